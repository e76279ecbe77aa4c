//! Errors raised while validating calculator configuration.

use thiserror::Error;

/// Rejected calculator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Weights are not finite, are negative, or sum to zero.
    #[error("{context} weights must be finite, non-negative, and sum to a positive total")]
    InvalidWeights {
        /// Which weight set was rejected.
        context: &'static str,
    },
    /// A score threshold lies outside `0..=100`.
    #[error("{name} threshold {value} is outside 0..=100")]
    ThresholdOutOfRange {
        /// Threshold name.
        name: &'static str,
        /// Rejected value.
        value: u8,
    },
    /// Tier thresholds do not descend from the best tier to the worst.
    #[error("tier thresholds must descend: perfeito >= excelente >= bom >= razoavel")]
    TiersOutOfOrder,
}
