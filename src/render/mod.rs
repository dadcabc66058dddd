//! Render output: justified display lines

mod display;

pub use display::{materialize, DisplayItem, Line, HYPHEN};
