//! Quiz configuration and tree-count normalization.
//!
//! Values coming from the presentation layer are normalized rather than
//! rejected: the tree count is clamped into `[MIN_TREES, MAX_TREES]` and
//! forced odd, and unparseable input falls back to `DEFAULT_TREES`.

use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest forest a round will build.
pub const MIN_TREES: usize = 3;

/// Largest forest a round will build.
pub const MAX_TREES: usize = 15;

/// Tree count used when the requested count is missing or malformed.
pub const DEFAULT_TREES: usize = 5;

// Odd bounds keep clamp-then-increment inside the range.
const _: () = assert!(MAX_TREES % 2 == 1, "MAX_TREES must be odd");
const _: () = assert!(MIN_TREES % 2 == 1, "MIN_TREES must be odd");

/// Split thresholds a generated tree can use.
pub const DEFAULT_THRESHOLDS: [f64; 5] = [0.2, 0.35, 0.5, 0.65, 0.8];

/// Chance that a tree whose leaves agree gets its right leaf flipped.
pub const DEFAULT_VARIETY_PROBABILITY: f64 = 0.7;

/// Clamps to `[MIN_TREES, MAX_TREES]`, then bumps even counts to the next odd.
pub fn normalize_tree_count(requested: i64) -> usize {
    let clamped = requested.clamp(MIN_TREES as i64, MAX_TREES as i64) as usize;
    let odd = if clamped % 2 == 0 { clamped + 1 } else { clamped };
    odd.min(MAX_TREES)
}

/// Parses user-entered tree-count text and normalizes it.
///
/// Reads the leading signed integer (`"7 trees"` is 7). Empty, non-numeric
/// or zero input yields `DEFAULT_TREES`.
pub fn parse_tree_count(input: &str) -> usize {
    match leading_integer(input) {
        Some(0) | None => DEFAULT_TREES,
        Some(n) => normalize_tree_count(n),
    }
}

fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        // Saturate; anything this large clamps to MAX_TREES anyway
        value = value.saturating_mul(10).saturating_add(i64::from(byte - b'0'));
    }

    seen.then_some(if negative { -value } else { value })
}

/// Tunables for tree generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid the split threshold is drawn from
    pub thresholds: Vec<f64>,

    /// Probability of flipping the right leaf when both leaves agree
    pub variety_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            variety_probability: DEFAULT_VARIETY_PROBABILITY,
        }
    }
}

/// Top-level quiz configuration. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Requested tree count for the first round (normalized on use)
    pub default_tree_count: usize,

    pub generator: GeneratorConfig,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            default_tree_count: DEFAULT_TREES,
            generator: GeneratorConfig::default(),
        }
    }
}

impl QuizConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, QuizError> {
        let config: QuizConfig =
            serde_json::from_str(json).map_err(|e| QuizError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| QuizError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Rejects values that would make generation meaningless.
    ///
    /// An empty threshold grid passes here; generation reports it.
    pub fn validate(&self) -> Result<(), QuizError> {
        let p = self.generator.variety_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(QuizError::invalid_argument(format!(
                "variety_probability must be in [0, 1], got {}",
                p
            )));
        }
        if let Some(bad) = self.generator.thresholds.iter().find(|t| !t.is_finite()) {
            return Err(QuizError::invalid_argument(format!(
                "threshold must be finite, got {}",
                bad
            )));
        }
        Ok(())
    }

    /// The default tree count after normalization. Zero means unset, as it
    /// does for typed input, and yields `DEFAULT_TREES`.
    pub fn effective_default_count(&self) -> usize {
        match self.default_tree_count {
            0 => DEFAULT_TREES,
            n => normalize_tree_count(i64::try_from(n).unwrap_or(i64::MAX)),
        }
    }

    /// Tree count for the first round: `requested` text when given,
    /// otherwise the configured default.
    pub fn first_round_count(&self, requested: Option<&str>) -> usize {
        requested.map_or_else(|| self.effective_default_count(), parse_tree_count)
    }
}
