//! Hyphenation pattern trie
//!
//! Patterns follow Liang's scheme: letters interleaved with digit weights,
//! e.g. `hy3ph` or `.ach4`. A pattern is stored along the trie path spelled
//! by its letters; the node at the end of the path carries one weight per
//! gap, so a pattern of `d` letters has `d + 1` weights.

use crate::error::{LayoutError, Result};
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Reserved key holding the weights of a node in the JSON form
pub const WEIGHTS_KEY: &str = "0";

/// Weights attached to a trie node, aligned to the consumed substring
pub type Weights = SmallVec<[u8; 8]>;

/// A node of the pattern trie
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternNode {
    children: FxHashMap<char, PatternNode>,
    weights: Option<Weights>,
}

impl PatternNode {
    /// Follow the edge labelled `c`
    pub fn child(&self, c: char) -> Option<&PatternNode> {
        self.children.get(&c)
    }

    /// Weights stored at this node, if a pattern ends here
    pub fn weights(&self) -> Option<&[u8]> {
        self.weights.as_deref()
    }

    fn count_patterns(&self) -> usize {
        let own = usize::from(self.weights.is_some());
        own + self.children.values().map(PatternNode::count_patterns).sum::<usize>()
    }

    fn from_value(value: &Value, path: &mut String, depth: usize) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| malformed(path.as_str(), "expected an object of child nodes"))?;

        let mut node = PatternNode::default();
        for (key, child) in object {
            if key == WEIGHTS_KEY {
                node.weights = Some(parse_weights(child, path.as_str(), depth)?);
                continue;
            }

            let mut chars = key.chars();
            let c = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(malformed(
                        path.as_str(),
                        &format!("child key {:?} must be a single character", key),
                    ))
                }
            };

            path.push(c);
            let parsed = PatternNode::from_value(child, path, depth + 1)?;
            path.pop();
            node.children.insert(c, parsed);
        }

        Ok(node)
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (c, child) in &self.children {
            map.insert(c.to_string(), child.to_value());
        }
        if let Some(weights) = &self.weights {
            map.insert(
                WEIGHTS_KEY.to_string(),
                Value::Array(weights.iter().map(|w| Value::from(*w)).collect()),
            );
        }
        Value::Object(map)
    }
}

fn parse_weights(value: &Value, path: &str, depth: usize) -> Result<Weights> {
    let entries = value
        .as_array()
        .ok_or_else(|| malformed(path, "weights must be an array"))?;

    if entries.len() > depth + 1 {
        return Err(malformed(
            path,
            &format!("{} weights for a pattern of {} letters", entries.len(), depth),
        ));
    }

    entries
        .iter()
        .map(|entry| {
            entry
                .as_u64()
                .and_then(|w| u8::try_from(w).ok())
                .ok_or_else(|| {
                    malformed(path, &format!("weight {} is not a small non-negative integer", entry))
                })
        })
        .collect()
}

fn malformed(path: &str, reason: &str) -> LayoutError {
    LayoutError::MalformedPattern {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Immutable hyphenation pattern dictionary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternTree {
    root: PatternNode,
}

impl PatternTree {
    /// Create an empty tree (never hyphenates)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the nested-mapping JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Load from an already parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut path = String::new();
        let root = PatternNode::from_value(value, &mut path, 0)?;
        Ok(Self { root })
    }

    /// Build a tree from TeX pattern text, one or more patterns per line.
    /// Blank lines and `%` comments are skipped.
    pub fn from_patterns(text: &str) -> Result<Self> {
        let mut tree = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('%') {
                continue;
            }
            for pattern in line.split_whitespace() {
                tree.insert_pattern(pattern)?;
            }
        }
        Ok(tree)
    }

    /// Insert one Liang pattern such as `hy3ph`
    pub fn insert_pattern(&mut self, pattern: &str) -> Result<()> {
        let mut weights = Weights::new();
        let mut letters = Vec::new();
        // Set once a letter is consumed; cleared by an explicit digit
        let mut gap_open = true;

        for c in pattern.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !gap_open {
                    return Err(malformed(pattern, "two weights in a row"));
                }
                weights.push(digit as u8);
                gap_open = false;
            } else {
                if gap_open {
                    weights.push(0);
                }
                letters.push(c);
                gap_open = true;
            }
        }
        if gap_open {
            weights.push(0);
        }
        if letters.is_empty() {
            return Err(malformed(pattern, "pattern has no letters"));
        }

        let mut node = &mut self.root;
        for c in letters {
            node = node.children.entry(c).or_default();
        }
        node.weights = Some(weights);
        Ok(())
    }

    /// Root of the trie
    pub fn root(&self) -> &PatternNode {
        &self.root
    }

    /// Number of patterns stored in the tree
    pub fn pattern_count(&self) -> usize {
        self.root.count_patterns()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Dump to the nested-mapping JSON form
    pub fn to_json(&self) -> String {
        self.root.to_value().to_string()
    }
}
