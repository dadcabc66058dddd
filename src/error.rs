//! Error types for hyphenation and line breaking

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised while loading patterns or laying out a paragraph
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Malformed hyphenation pattern at {path:?}: {reason}")]
    MalformedPattern { path: String, reason: String },

    #[error("Pattern tree is not valid JSON: {0}")]
    PatternJson(#[from] serde_json::Error),

    #[error("Line width must be a positive number, got {0}")]
    InvalidLineWidth(f64),

    #[error("Width of {text:?} measured as {width}, expected a non-negative number")]
    InvalidMeasurement { text: String, width: f64 },

    #[error("Invalid break configuration: {0}")]
    InvalidConfig(String),

    #[error("Paragraph cannot be broken into lines: no feasible layout reaches element {position}")]
    UnbreakableParagraph { position: usize },
}

impl LayoutError {
    /// Whether the error comes from bad input or configuration rather than
    /// from the paragraph itself
    pub fn is_config_error(&self) -> bool {
        !matches!(self, LayoutError::UnbreakableParagraph { .. })
    }
}
