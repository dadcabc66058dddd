//! Paragraph layout: elements, line breaking and the typesetting pipeline

mod builder;
mod config;
mod element;
mod engine;
pub mod font;
mod line_break;

pub use builder::build_elements;
pub use config::{BreakConfig, LineWidths};
pub use element::{
    Breakable, Glue, ParagraphElement, Penalty, TextBox, MANDATORY_BREAK, PROHIBITED_BREAK,
};
pub use engine::Typesetter;
pub use font::{FontMetrics, TextMeasure};
pub use line_break::{Breakpoint, FitnessClass, LineBreaker, MAXIMUM_SHRINK_RATIO};
