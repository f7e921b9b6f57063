//! Decomposition configuration.

use crate::error::{LotteryError, Result};

/// Options for [`Decomposer`](super::Decomposer).
///
/// # Examples
///
/// ```
/// use u_lottery::decomposition::DecompositionConfig;
///
/// let config = DecompositionConfig::default()
///     .with_merge_duplicates(true)
///     .with_max_terms(64);
/// assert!(config.verify);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecompositionConfig {
    /// Merge terms with identical assignments by summing their weights.
    ///
    /// The first occurrence keeps its position. Off by default, so terms
    /// appear in the order the matchings were extracted.
    pub merge_duplicates: bool,

    /// Check the result before returning it: weights sum to 1 and the
    /// weighted assignments reproduce the fractional allocation.
    pub verify: bool,

    /// Upper bound on the number of extracted matchings. `None` = no limit.
    ///
    /// The extraction count never exceeds the number of positive entries, so
    /// hitting a smaller bound is reported as an invariant violation.
    pub max_terms: Option<usize>,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            merge_duplicates: false,
            verify: true,
            max_terms: None,
        }
    }
}

impl DecompositionConfig {
    /// Enables or disables merging of identical assignments.
    pub fn with_merge_duplicates(mut self, merge: bool) -> Self {
        self.merge_duplicates = merge;
        self
    }

    /// Enables or disables result verification.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Caps the number of extracted matchings.
    pub fn with_max_terms(mut self, n: usize) -> Self {
        self.max_terms = Some(n);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_terms == Some(0) {
            return Err(LotteryError::Config("max_terms must be positive".into()));
        }
        Ok(())
    }
}
