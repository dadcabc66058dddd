//! Typesetting pipeline: text to justified lines

use crate::error::Result;
use crate::hyphenation::{hyphenate, PatternTree};
use crate::layout::builder::build_elements;
use crate::layout::config::{BreakConfig, LineWidths};
use crate::layout::element::ParagraphElement;
use crate::layout::font::TextMeasure;
use crate::layout::line_break::{Breakpoint, LineBreaker};
use crate::render::{materialize, Line};

/// Hyphenates and justifies paragraphs against one pattern tree
#[derive(Debug, Clone)]
pub struct Typesetter<'t> {
    tree: &'t PatternTree,
    config: BreakConfig,
}

impl<'t> Typesetter<'t> {
    pub fn new(tree: &'t PatternTree) -> Self {
        Self {
            tree,
            config: BreakConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BreakConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BreakConfig {
        &self.config
    }

    pub fn tree(&self) -> &'t PatternTree {
        self.tree
    }

    pub fn hyphenate<'w>(&self, word: &'w str) -> Vec<&'w str> {
        hyphenate(self.tree, word)
    }

    pub fn build_elements<M>(&self, text: &str, measure: &M) -> Result<Vec<ParagraphElement>>
    where
        M: TextMeasure + ?Sized,
    {
        build_elements(self.tree, text, measure, &self.config)
    }

    /// Break `text` into justified lines of `line_width`
    pub fn line_break<M>(&self, text: &str, measure: &M, line_width: f64) -> Result<Vec<Line>>
    where
        M: TextMeasure + ?Sized,
    {
        self.line_break_with_widths(text, measure, &LineWidths::uniform(line_width))
    }

    /// Break `text` with a target width per line; the last width repeats
    pub fn line_break_with_widths<M>(
        &self,
        text: &str,
        measure: &M,
        widths: &LineWidths,
    ) -> Result<Vec<Line>>
    where
        M: TextMeasure + ?Sized,
    {
        let (elements, breakpoints) = self.break_points(text, measure, widths)?;
        Ok(materialize(&elements, &breakpoints))
    }

    /// Elements and the optimal breakpoints, before materializing
    pub fn break_points<M>(
        &self,
        text: &str,
        measure: &M,
        widths: &LineWidths,
    ) -> Result<(Vec<ParagraphElement>, Vec<Breakpoint>)>
    where
        M: TextMeasure + ?Sized,
    {
        self.config.validate()?;
        widths.validate()?;

        if text.split_whitespace().next().is_none() {
            return Ok((Vec::new(), Vec::new()));
        }

        let elements = self.build_elements(text, measure)?;
        let breakpoints = LineBreaker::new(self.config).break_points(&elements, widths)?;
        Ok((elements, breakpoints))
    }
}
