//! Liang-style pattern matching over a single word

use super::listener::{HyphenateListener, NullListener};
use super::pattern::PatternTree;
use smallvec::{smallvec, SmallVec};
use std::fmt::Write;

/// Boundary marker padded around the word before matching
const WORD_BOUNDARY: char = '.';

/// Split `word` at every legal hyphenation point.
///
/// The syllables borrow from `word` and concatenate back to it exactly.
pub fn hyphenate<'w>(tree: &PatternTree, word: &'w str) -> Vec<&'w str> {
    hyphenate_with(tree, word, &mut NullListener)
}

/// Like [`hyphenate`], reporting the matching process to `listener`
pub fn hyphenate_with<'w>(
    tree: &PatternTree,
    word: &'w str,
    listener: &mut dyn HyphenateListener,
) -> Vec<&'w str> {
    let tracing = listener.is_active();

    // One lower-cased char per source char keeps scores aligned with `word`
    let work: SmallVec<[char; 32]> = std::iter::once(WORD_BOUNDARY)
        .chain(word.chars().map(|c| c.to_lowercase().next().unwrap_or(c)))
        .chain(std::iter::once(WORD_BOUNDARY))
        .collect();

    if tracing {
        listener.on_start(&decorate(&work));
    }

    // points[k] scores the gap before work[k]
    let mut points: SmallVec<[u8; 32]> = smallvec![0; work.len() + 1];

    for start in 0..work.len() {
        let mut node = tree.root();
        for (depth, &c) in work[start..].iter().enumerate() {
            let Some(next) = node.child(c) else {
                break;
            };
            node = next;

            if let Some(weights) = node.weights() {
                for (offset, &weight) in weights.iter().enumerate() {
                    if let Some(point) = points.get_mut(start + offset) {
                        *point = (*point).max(weight);
                    }
                }
                if tracing {
                    listener.on_match(start * 2, &interleave(&work[start..=start + depth], weights));
                }
            }
        }
    }

    // Keep at least two letters before the first and after the last break
    let len = points.len();
    for idx in [1, 2, len - 3, len - 2] {
        points[idx] = 0;
    }

    let mut pieces = Vec::new();
    let mut piece_start = 0;
    for (idx, (byte_idx, c)) in word.char_indices().enumerate() {
        if points[idx + 2] % 2 != 0 {
            let end = byte_idx + c.len_utf8();
            pieces.push(&word[piece_start..end]);
            piece_start = end;
        }
    }
    pieces.push(&word[piece_start..]);

    if tracing {
        listener.on_end(&interleave(&work, &points));
    }

    pieces
}

/// `" . w o r d ."`
fn decorate(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len() * 2);
    for &c in chars {
        out.push(' ');
        out.push(c);
    }
    out
}

/// Weights written in the gaps between characters: `"0h0y3p0h0 "`
fn interleave(chars: &[char], weights: &[u8]) -> String {
    let mut out = String::with_capacity(chars.len() * 2 + 2);
    for (idx, c) in chars.iter().copied().chain(std::iter::once(' ')).enumerate() {
        if let Some(weight) = weights.get(idx) {
            let _ = write!(out, "{}", weight);
        }
        out.push(c);
    }
    out
}
