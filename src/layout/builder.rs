//! Paragraph text to boxes, glue and penalties

use crate::error::{LayoutError, Result};
use crate::hyphenation::{hyphenate_with, LogListener, PatternTree};
use crate::layout::config::BreakConfig;
use crate::layout::element::{Glue, ParagraphElement, Penalty, TextBox};
use crate::layout::font::TextMeasure;

/// Punctuation kept attached to the end of a word and never hyphenated
const TRAILING_PUNCTUATION: [char; 4] = ['.', ',', ';', ':'];

/// Turn paragraph text into the element sequence fed to the line breaker.
///
/// Words are separated by interword glue; hyphenation points become flagged
/// penalties. The sequence always ends with finishing glue and a forced
/// break so the last line is produced by a mandatory break.
pub fn build_elements<M>(
    tree: &PatternTree,
    text: &str,
    measure: &M,
    config: &BreakConfig,
) -> Result<Vec<ParagraphElement>>
where
    M: TextMeasure + ?Sized,
{
    let hyphen = Penalty::new(measured(measure, "-")?, config.hyphen_penalty, true);
    let space = Glue::interword(measured(measure, " ")?, config);

    let mut elements = Vec::new();
    let mut words = 0;
    for word in text.split_whitespace() {
        if words > 0 {
            elements.push(ParagraphElement::Glue(space));
        }
        push_word(&mut elements, tree, word, hyphen, measure)?;
        words += 1;
    }

    elements.push(ParagraphElement::Penalty(Penalty::prohibited()));
    elements.push(ParagraphElement::Glue(Glue::finishing(config)));
    elements.push(ParagraphElement::Penalty(Penalty::forced_break()));

    log::debug!("built {} elements from {} words", elements.len(), words);
    Ok(elements)
}

fn push_word<M>(
    elements: &mut Vec<ParagraphElement>,
    tree: &PatternTree,
    word: &str,
    hyphen: Penalty,
    measure: &M,
) -> Result<()>
where
    M: TextMeasure + ?Sized,
{
    let (core, suffix) = split_punctuation(word);
    if core.is_empty() {
        elements.push(boxed(word.to_string(), measure)?);
        return Ok(());
    }

    let syllables = hyphenate_with(tree, core, &mut LogListener);
    let last = syllables.len() - 1;
    for (idx, syllable) in syllables.into_iter().enumerate() {
        if idx < last {
            elements.push(boxed(syllable.to_string(), measure)?);
            elements.push(ParagraphElement::Penalty(hyphen));
        } else {
            elements.push(boxed(format!("{}{}", syllable, suffix), measure)?);
        }
    }
    Ok(())
}

/// `"word.),"` -> `("word", ".),")`
fn split_punctuation(word: &str) -> (&str, &str) {
    match word.find(&TRAILING_PUNCTUATION[..]) {
        Some(idx) => word.split_at(idx),
        None => (word, ""),
    }
}

fn boxed<M>(content: String, measure: &M) -> Result<ParagraphElement>
where
    M: TextMeasure + ?Sized,
{
    let width = measured(measure, &content)?;
    Ok(ParagraphElement::Box(TextBox::new(content, width)))
}

fn measured<M>(measure: &M, text: &str) -> Result<f64>
where
    M: TextMeasure + ?Sized,
{
    let width = measure.measure(text);
    if width.is_finite() && width >= 0.0 {
        Ok(width)
    } else {
        Err(LayoutError::InvalidMeasurement {
            text: text.to_string(),
            width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::element::Breakable;

    fn chars10(s: &str) -> f64 {
        10.0 * s.chars().count() as f64
    }

    fn contents(elements: &[ParagraphElement]) -> Vec<String> {
        elements
            .iter()
            .map(|e| match e {
                ParagraphElement::Box(b) => b.content.clone(),
                ParagraphElement::Glue(_) => "_".to_string(),
                ParagraphElement::Penalty(p) if p.is_mandatory() => "!".to_string(),
                ParagraphElement::Penalty(p) if p.is_prohibited() => "~".to_string(),
                ParagraphElement::Penalty(_) => "-".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_words_and_glue() {
        let elements =
            build_elements(&PatternTree::new(), "aa bb cc", &chars10, &BreakConfig::default()).unwrap();
        assert_eq!(contents(&elements), vec!["aa", "_", "bb", "_", "cc", "~", "_", "!"]);

        match &elements[1] {
            ParagraphElement::Glue(g) => {
                assert_eq!(g.width, 10.0);
                assert_eq!(g.stretch, 5.0);
                assert!((g.shrink - 10.0 / 3.0).abs() < 1e-12);
            }
            other => panic!("expected glue, got {:?}", other),
        }
        match &elements[6] {
            ParagraphElement::Glue(g) => {
                assert_eq!(g.width, 0.0);
                assert_eq!(g.stretch, 100000.0);
                assert_eq!(g.shrink, 0.0);
            }
            other => panic!("expected finishing glue, got {:?}", other),
        }
        assert!(elements[7].as_breakable().unwrap().is_flagged());
    }

    #[test]
    fn test_hyphenated_word_with_punctuation() {
        let mut tree = PatternTree::new();
        tree.insert_pattern("hen5at").unwrap();

        let elements =
            build_elements(&tree, "hyphenation, please", &chars10, &BreakConfig::default()).unwrap();
        assert_eq!(
            contents(&elements),
            vec!["hyphen", "-", "ation,", "_", "please", "~", "_", "!"]
        );

        match &elements[1] {
            ParagraphElement::Penalty(p) => {
                assert_eq!(p.width, 10.0);
                assert_eq!(p.value, 50.0);
                assert!(p.flagged);
            }
            other => panic!("expected hyphen penalty, got {:?}", other),
        }
        assert_eq!(elements[2].width(), 60.0);
    }

    #[test]
    fn test_leading_punctuation_stays_whole() {
        let elements =
            build_elements(&PatternTree::new(), "... ok", &chars10, &BreakConfig::default()).unwrap();
        assert_eq!(contents(&elements), vec!["...", "_", "ok", "~", "_", "!"]);
    }

    #[test]
    fn test_whitespace_runs_and_empty_text() {
        let elements =
            build_elements(&PatternTree::new(), "  a \n\n b  ", &chars10, &BreakConfig::default()).unwrap();
        assert_eq!(contents(&elements), vec!["a", "_", "b", "~", "_", "!"]);

        let elements = build_elements(&PatternTree::new(), "", &chars10, &BreakConfig::default()).unwrap();
        assert_eq!(contents(&elements), vec!["~", "_", "!"]);
    }

    #[test]
    fn test_negative_measurement_rejected() {
        let measure = |s: &str| if s == "-" { -1.0 } else { 1.0 };
        let result = build_elements(&PatternTree::new(), "word", &measure, &BreakConfig::default());
        assert!(matches!(
            result,
            Err(LayoutError::InvalidMeasurement { ref text, .. }) if text == "-"
        ));

        let measure = |_: &str| f64::NAN;
        assert!(build_elements(&PatternTree::new(), "word", &measure, &BreakConfig::default()).is_err());
    }

    #[test]
    fn test_split_punctuation() {
        assert_eq!(split_punctuation("word."), ("word", "."));
        assert_eq!(split_punctuation("a:b"), ("a", ":b"));
        assert_eq!(split_punctuation("plain"), ("plain", ""));
    }
}
