//! Mini-Justify: hyphenation and optimal line breaking
//!
//! This crate provides the core typesetting engine with:
//! - Liang pattern hyphenation over a character trie
//! - Knuth–Plass total-fit line breaking (boxes, glue and penalties)
//! - Justified display lines with adjusted glue and inserted hyphens
//! - A flat-buffer WASM bridge for web front-ends

pub mod error;
pub mod hyphenation;
pub mod layout;
pub mod render;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmTypesetter;

// Re-export primary types
pub use error::{LayoutError, Result};
pub use hyphenation::{
    hyphenate, hyphenate_with, HyphenateListener, LogListener, NullListener, PatternTree,
    RecordingListener, TraceEvent,
};
pub use layout::{
    BreakConfig, Breakpoint, FitnessClass, FontMetrics, LineBreaker, LineWidths,
    ParagraphElement, TextMeasure, Typesetter,
};
pub use render::{DisplayItem, Line};

/// Break `text` into justified lines of `line_width` with the default
/// configuration.
///
/// `measure` gives the width of any string, such as a word, a syllable,
/// `" "` or `"-"`.
pub fn line_break<M>(tree: &PatternTree, text: &str, measure: &M, line_width: f64) -> Result<Vec<Line>>
where
    M: TextMeasure + ?Sized,
{
    Typesetter::new(tree).line_break(text, measure, line_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars10(s: &str) -> f64 {
        10.0 * s.chars().count() as f64
    }

    #[test]
    fn test_line_break_entry_point() {
        let tree = PatternTree::new();
        let lines = line_break(&tree, "aa bb cc", &chars10, 1000.0).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "aa bb cc");
    }

    #[test]
    fn test_patterns_from_json() {
        let tree = PatternTree::from_json(r#"{"h":{"e":{"n":{"a":{"t":{"0":[0,0,0,5,0,0]}}}}}}"#).unwrap();
        assert_eq!(hyphenate(&tree, "hyphenation"), vec!["hyphen", "ation"]);

        let lines = line_break(&tree, "the hyphenation rule", &chars10, 113.0).unwrap();
        assert_eq!(lines[0].text(), "the hyphen-");
    }

    #[test]
    fn test_malformed_patterns_rejected() {
        assert!(matches!(
            PatternTree::from_json(r#"{"ab":{}}"#),
            Err(LayoutError::MalformedPattern { .. })
        ));
        assert!(matches!(PatternTree::from_json("{"), Err(LayoutError::PatternJson(_))));
    }
}
