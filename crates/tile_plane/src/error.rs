//! Error types for rule parsing and direction codes.

use thiserror::Error;

/// Largest total threshold a rule may demand: a tile has at most 8 neighbors.
pub const MAX_RULE_WEIGHT: u32 = 8;

/// A rule definition that cannot enter a [`RuleSet`](crate::rule::RuleSet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid rule: missing result color")]
    MissingResult,

    #[error("invalid rule: threshold `{token}` is not a non-negative integer")]
    InvalidThreshold { token: String },

    #[error("invalid rule: threshold {threshold} has no color")]
    MissingColor { threshold: u32 },

    #[error("invalid rule: sum of thresholds is {sum}, must be <= {}", MAX_RULE_WEIGHT)]
    Overweight { sum: u32 },
}

/// Unknown direction code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction `{code}`")]
pub struct DirectionError {
    pub code: String,
}
