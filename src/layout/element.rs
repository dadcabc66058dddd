//! Paragraph elements: boxes, glue and penalties

use crate::layout::config::BreakConfig;

/// Penalty value that forces a break
pub const MANDATORY_BREAK: f64 = -1000.0;

/// Penalty value that forbids a break
pub const PROHIBITED_BREAK: f64 = 1000.0;

/// Capabilities shared by the elements a line may end at
pub trait Breakable {
    /// Cost of breaking here
    fn penalty(&self) -> f64;
    /// Extra width shown only when the break is taken
    fn penalty_width(&self) -> f64;
    /// Flagged breaks are discouraged on consecutive lines
    fn is_flagged(&self) -> bool;

    fn is_mandatory(&self) -> bool {
        self.penalty() <= MANDATORY_BREAK
    }
}

/// Unbreakable unit of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub content: String,
    pub width: f64,
}

impl TextBox {
    pub fn new(content: impl Into<String>, width: f64) -> Self {
        Self {
            content: content.into(),
            width,
        }
    }
}

/// Elastic space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glue {
    pub width: f64,
    pub stretch: f64,
    pub shrink: f64,
}

impl Glue {
    pub fn new(width: f64, stretch: f64, shrink: f64) -> Self {
        Self { width, stretch, shrink }
    }

    /// Space between two words
    pub fn interword(width: f64, config: &BreakConfig) -> Self {
        Self::new(width, width * config.space_stretch, width * config.space_shrink)
    }

    /// Fills the rest of the last line
    pub fn finishing(config: &BreakConfig) -> Self {
        Self::new(0.0, config.finishing_stretch, 0.0)
    }
}

impl Breakable for Glue {
    fn penalty(&self) -> f64 {
        0.0
    }

    fn penalty_width(&self) -> f64 {
        0.0
    }

    fn is_flagged(&self) -> bool {
        false
    }
}

/// Optional breakpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penalty {
    pub width: f64,
    pub value: f64,
    pub flagged: bool,
}

impl Penalty {
    pub fn new(width: f64, value: f64, flagged: bool) -> Self {
        Self { width, value, flagged }
    }

    /// Break that ends the paragraph
    pub fn forced_break() -> Self {
        Self::new(0.0, MANDATORY_BREAK, true)
    }

    /// Keeps the finishing glue attached to the last word
    pub fn prohibited() -> Self {
        Self::new(0.0, PROHIBITED_BREAK, false)
    }

    pub fn is_prohibited(&self) -> bool {
        self.value >= PROHIBITED_BREAK
    }
}

impl Breakable for Penalty {
    fn penalty(&self) -> f64 {
        self.value
    }

    fn penalty_width(&self) -> f64 {
        self.width
    }

    fn is_flagged(&self) -> bool {
        self.flagged
    }
}

/// One typesetting primitive of a paragraph
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphElement {
    Box(TextBox),
    Glue(Glue),
    Penalty(Penalty),
}

impl ParagraphElement {
    pub fn is_box(&self) -> bool {
        matches!(self, ParagraphElement::Box(_))
    }

    /// Glue and penalties; boxes cannot end a line
    pub fn as_breakable(&self) -> Option<&dyn Breakable> {
        match self {
            ParagraphElement::Box(_) => None,
            ParagraphElement::Glue(glue) => Some(glue),
            ParagraphElement::Penalty(penalty) => Some(penalty),
        }
    }

    /// Nominal width contributed to a line that does not break here
    pub fn width(&self) -> f64 {
        match self {
            ParagraphElement::Box(b) => b.width,
            ParagraphElement::Glue(g) => g.width,
            ParagraphElement::Penalty(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert!(Penalty::forced_break().is_mandatory());
        assert!(Penalty::forced_break().is_flagged());
        assert!(Penalty::prohibited().is_prohibited());
        assert!(!Penalty::new(3.0, 50.0, true).is_mandatory());
        assert!(!Penalty::new(3.0, 50.0, true).is_prohibited());
    }

    #[test]
    fn test_interword_glue() {
        let glue = Glue::interword(12.0, &BreakConfig::default());
        assert_eq!(glue.width, 12.0);
        assert_eq!(glue.stretch, 6.0);
        assert_eq!(glue.shrink, 4.0);
        assert_eq!(glue.penalty(), 0.0);
        assert!(!glue.is_flagged());
    }

    #[test]
    fn test_breakable_view() {
        let hyphen = ParagraphElement::Penalty(Penalty::new(5.0, 50.0, true));
        let view = hyphen.as_breakable().unwrap();
        assert_eq!(view.penalty(), 50.0);
        assert_eq!(view.penalty_width(), 5.0);
        assert_eq!(hyphen.width(), 0.0);

        let word = ParagraphElement::Box(TextBox::new("word", 40.0));
        assert!(word.as_breakable().is_none());
        assert!(word.is_box());
        assert_eq!(word.width(), 40.0);
    }
}
