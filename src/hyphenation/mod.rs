//! Hyphenation: pattern trie and Liang matcher

mod listener;
mod matcher;
mod pattern;

#[cfg(test)]
mod proptests;

pub use listener::{HyphenateListener, LogListener, NullListener, RecordingListener, TraceEvent};
pub use matcher::{hyphenate, hyphenate_with};
pub use pattern::{PatternNode, PatternTree, Weights, WEIGHTS_KEY};
