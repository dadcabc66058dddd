//! Display lines: render-ready representation of a broken paragraph

use crate::layout::{Breakpoint, ParagraphElement};
use serde::Serialize;

/// Content of a hyphen inserted at a broken penalty
pub const HYPHEN: &str = "-";

/// A display item to render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DisplayItem {
    /// Text, or the hyphen added where a word was broken
    Box {
        content: String,
        width: f64,
        hyphen: bool,
    },
    /// Space with its width already adjusted for the line
    Glue { width: f64 },
}

impl DisplayItem {
    pub fn width(&self) -> f64 {
        match self {
            DisplayItem::Box { width, .. } | DisplayItem::Glue { width } => *width,
        }
    }

    pub fn is_box(&self) -> bool {
        matches!(self, DisplayItem::Box { .. })
    }
}

/// One justified line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub items: Vec<DisplayItem>,
    /// Adjustment ratio the glue was set with
    pub ratio: f64,
}

impl Line {
    /// Total width of the items as set
    pub fn width(&self) -> f64 {
        self.items.iter().map(DisplayItem::width).sum()
    }

    /// Plain text of the line, one space per glue
    pub fn text(&self) -> String {
        let mut text = String::new();
        for item in &self.items {
            match item {
                DisplayItem::Box { content, .. } => text.push_str(content),
                DisplayItem::Glue { .. } => text.push(' '),
            }
        }
        text
    }

    /// Left edge of every item
    pub fn positions(&self) -> Vec<f64> {
        let mut x = 0.0;
        self.items
            .iter()
            .map(|item| {
                let start = x;
                x += item.width();
                start
            })
            .collect()
    }

    /// Number of box items, hyphens included
    pub fn box_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_box()).count()
    }
}

/// Cut `elements` into lines at `breakpoints` and set their glue.
pub fn materialize(elements: &[ParagraphElement], breakpoints: &[Breakpoint]) -> Vec<Line> {
    let mut lines = Vec::with_capacity(breakpoints.len());
    let mut start = 0;

    for breakpoint in breakpoints {
        let ratio = breakpoint.ratio;
        let end = breakpoint.position.min(elements.len());
        let mut items = Vec::new();

        for element in &elements[start..end] {
            match element {
                ParagraphElement::Box(word) => items.push(DisplayItem::Box {
                    content: word.content.clone(),
                    width: word.width,
                    hyphen: false,
                }),
                ParagraphElement::Glue(glue) => {
                    let width = if !ratio.is_finite() {
                        glue.width
                    } else if ratio >= 0.0 {
                        glue.width + ratio * glue.stretch
                    } else {
                        glue.width + ratio * glue.shrink
                    };
                    items.push(DisplayItem::Glue { width });
                }
                ParagraphElement::Penalty(_) => {}
            }
        }

        while matches!(items.last(), Some(DisplayItem::Glue { .. })) {
            items.pop();
        }

        if let Some(ParagraphElement::Penalty(penalty)) = elements.get(end) {
            if penalty.width > 0.0 {
                items.push(DisplayItem::Box {
                    content: HYPHEN.to_string(),
                    width: penalty.width,
                    hyphen: true,
                });
            }
        }

        lines.push(Line { items, ratio });

        start = end + 1;
        while start < elements.len() && !elements[start].is_box() {
            start += 1;
        }
    }

    lines
}
