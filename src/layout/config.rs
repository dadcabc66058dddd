//! Tunables of the line breaker

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// Knobs for building elements and scoring breakpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BreakConfig {
    /// Loosest adjustment ratio accepted for a line
    pub max_ratio: f64,
    /// Cost of breaking at a hyphenation point
    pub hyphen_penalty: f64,
    /// Added when two consecutive lines end at flagged breaks
    pub consecutive_flagged_demerits: f64,
    /// Added when adjacent lines differ by more than one fitness class
    pub fitness_jump_demerits: f64,
    /// Badness of a line that has no glue to stretch
    pub infinite_badness: f64,
    /// Interword stretch as a fraction of the space width
    pub space_stretch: f64,
    /// Interword shrink as a fraction of the space width
    pub space_shrink: f64,
    /// Stretch of the glue that fills the last line
    pub finishing_stretch: f64,
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self {
            max_ratio: 2.0,
            hyphen_penalty: 50.0,
            consecutive_flagged_demerits: 3000.0,
            fitness_jump_demerits: 3000.0,
            infinite_badness: 10000.0,
            space_stretch: 1.0 / 2.0,
            space_shrink: 1.0 / 3.0,
            finishing_stretch: 100000.0,
        }
    }
}

impl BreakConfig {
    /// Parse a (possibly partial) camelCase JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LayoutError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Every tunable must be a finite non-negative number
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("maxRatio", self.max_ratio),
            ("hyphenPenalty", self.hyphen_penalty),
            ("consecutiveFlaggedDemerits", self.consecutive_flagged_demerits),
            ("fitnessJumpDemerits", self.fitness_jump_demerits),
            ("infiniteBadness", self.infinite_badness),
            ("spaceStretch", self.space_stretch),
            ("spaceShrink", self.space_shrink),
            ("finishingStretch", self.finishing_stretch),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.finishing_stretch == 0.0 {
            return Err(LayoutError::InvalidConfig(
                "finishingStretch must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Target width of each line; the last entry repeats
#[derive(Debug, Clone, PartialEq)]
pub struct LineWidths {
    widths: SmallVec<[f64; 4]>,
}

impl LineWidths {
    /// Same width for every line
    pub fn uniform(width: f64) -> Self {
        Self {
            widths: smallvec![width],
        }
    }

    /// One width per line, e.g. a narrower indented first line
    pub fn per_line(widths: impl IntoIterator<Item = f64>) -> Self {
        Self {
            widths: widths.into_iter().collect(),
        }
    }

    /// Width of line `line` (1-based)
    pub fn get(&self, line: usize) -> f64 {
        let idx = line.saturating_sub(1).min(self.widths.len().saturating_sub(1));
        self.widths.get(idx).copied().unwrap_or(0.0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.widths.is_empty() {
            return Err(LayoutError::InvalidLineWidth(0.0));
        }
        match self.widths.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
            Some(&bad) => Err(LayoutError::InvalidLineWidth(bad)),
            None => Ok(()),
        }
    }
}
