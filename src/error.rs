//! Error taxonomy shared by every stage of the pipeline.

use crate::rational::Rational;
use thiserror::Error;

/// Errors produced while building or decomposing a random assignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LotteryError {
    /// Malformed input: empty matrix, ragged rows, mismatched dimensions.
    ///
    /// Raised before any computation happens.
    #[error("invalid input: {0}")]
    Validation(String),

    /// An invalid [`LotteryConfig`](crate::lottery::LotteryConfig) or
    /// [`DecompositionConfig`](crate::decomposition::DecompositionConfig).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A guarantee the algorithm relies on did not hold.
    ///
    /// The typical cause is a matrix that is not doubly stochastic reaching
    /// the matcher, which then cannot find a perfect matching. This is never
    /// transient: the computation is deterministic, so retrying on the same
    /// input fails the same way. `snapshot` holds the matrix being processed
    /// when the breach was detected.
    #[error(
        "internal invariant violated: {reason} (snapshot {}x{})",
        .snapshot.len(),
        .snapshot.first().map_or(0, Vec::len)
    )]
    InternalInvariantViolation {
        reason: String,
        snapshot: Vec<Vec<Rational>>,
    },
}

impl LotteryError {
    pub(crate) fn invariant(reason: impl Into<String>, snapshot: Vec<Vec<Rational>>) -> Self {
        Self::InternalInvariantViolation {
            reason: reason.into(),
            snapshot,
        }
    }

    /// Whether this error signals an internal contract breach rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::InternalInvariantViolation { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LotteryError>;
