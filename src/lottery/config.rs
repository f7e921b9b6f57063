//! Pipeline configuration.

use crate::decomposition::DecompositionConfig;
use crate::error::Result;

/// Configuration for [`LotteryRunner`](super::LotteryRunner).
///
/// # Examples
///
/// ```
/// use u_lottery::lottery::LotteryConfig;
///
/// let config = LotteryConfig::default()
///     .with_merge_duplicates(true)
///     .with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// assert!(config.decomposition.merge_duplicates);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotteryConfig {
    /// Options for the decomposition step.
    pub decomposition: DecompositionConfig,

    /// Random seed for drawing an assignment.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether [`run_batch`](super::LotteryRunner::run_batch) processes
    /// profiles on the rayon thread pool. Only takes effect with the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            decomposition: DecompositionConfig::default(),
            seed: None,
            parallel: true,
        }
    }
}

impl LotteryConfig {
    /// Replaces the decomposition options.
    pub fn with_decomposition(mut self, decomposition: DecompositionConfig) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Enables or disables merging of identical assignments.
    pub fn with_merge_duplicates(mut self, merge: bool) -> Self {
        self.decomposition.merge_duplicates = merge;
        self
    }

    /// Enables or disables result verification.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.decomposition.verify = verify;
        self
    }

    /// Caps the number of lottery terms.
    pub fn with_max_terms(mut self, n: usize) -> Self {
        self.decomposition.max_terms = Some(n);
        self
    }

    /// Sets the random seed for drawing.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.decomposition.validate()
    }
}
