//! End-to-end pipeline execution.
//!
//! [`LotteryRunner`] chains the stages:
//! utilities → rankings → PS allocation → representatives → lottery.

use super::config::LotteryConfig;
use crate::decomposition::{Decomposer, Lottery, LotteryTerm};
use crate::error::{LotteryError, Result};
use crate::preference::{OrdinalProfile, PreferenceBuilder, UtilityProfile};
use crate::ps::{FractionalAllocation, PsEngine};
use crate::rational::Rational;
use crate::representative::{RepresentativeAllocation, RepresentativeSplitter};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Result of a full pipeline run.
///
/// Holds every intermediate product alongside the final lottery.
#[derive(Debug, Clone)]
pub struct LotteryResult {
    /// Padded ordinal rankings.
    pub profile: OrdinalProfile,

    /// PS fractional allocation (`n × t`, dummy columns included).
    pub allocation: FractionalAllocation,

    /// Square representative allocation that was decomposed.
    pub representatives: RepresentativeAllocation,

    /// The lottery over discrete assignments.
    pub lottery: Lottery,

    /// Number of PS eating rounds.
    pub ps_rounds: usize,
}

/// A lottery together with one assignment drawn from it.
#[derive(Debug, Clone)]
pub struct Draw {
    /// The full pipeline result.
    pub result: LotteryResult,

    /// Position of the drawn term in `result.lottery`.
    pub index: usize,
}

impl Draw {
    /// The drawn term.
    pub fn term(&self) -> &LotteryTerm {
        &self.result.lottery.terms()[self.index]
    }

    /// The drawn `n × m` assignment.
    pub fn assignment(&self) -> &[Vec<u32>] {
        &self.term().assignment
    }
}

/// Runs the random assignment pipeline.
///
/// # Usage
///
/// ```
/// use u_lottery::lottery::{LotteryConfig, LotteryRunner};
/// use u_lottery::preference::UtilityProfile;
/// use u_lottery::rational::rational;
///
/// let utils = UtilityProfile::from_integers(&[vec![2, 1], vec![1, 2]]).unwrap();
/// let result = LotteryRunner::run(&utils, &LotteryConfig::default()).unwrap();
///
/// assert_eq!(result.lottery.len(), 1);
/// assert_eq!(result.lottery.terms()[0].weight, rational(1));
/// assert_eq!(result.lottery.terms()[0].assignment, vec![vec![1, 0], vec![0, 1]]);
/// ```
pub struct LotteryRunner;

impl LotteryRunner {
    /// Runs the full pipeline on a validated utility profile.
    ///
    /// # Errors
    /// [`LotteryError::Config`] for an invalid configuration;
    /// [`LotteryError::InternalInvariantViolation`] if an internal guarantee
    /// breaks (never expected for valid input).
    pub fn run(utilities: &UtilityProfile, config: &LotteryConfig) -> Result<LotteryResult> {
        config.validate()?;

        let profile = PreferenceBuilder::build(utilities);
        debug!(
            "rankings: {} agents, {} items, {} representatives each, {} dummies",
            profile.agent_count(),
            profile.item_count(),
            profile.copies(),
            profile.dummy_count()
        );

        let ps = PsEngine::run(&profile);
        debug!("probabilistic serial finished after {} rounds", ps.rounds);

        let representatives = RepresentativeSplitter::split(&profile, &ps.allocation)?;
        debug!(
            "split into {0}x{0} representative allocation with {1} positive entries",
            representatives.size(),
            representatives.support_len()
        );

        let lottery = Decomposer::decompose(&representatives, &config.decomposition)?;

        Ok(LotteryResult {
            profile,
            allocation: ps.allocation,
            representatives,
            lottery,
            ps_rounds: ps.rounds,
        })
    }

    /// Validates a raw utility matrix, then runs the pipeline.
    ///
    /// # Errors
    /// [`LotteryError::Validation`] for an empty or ragged matrix, plus the
    /// errors of [`run`](Self::run).
    pub fn run_matrix(
        utilities: Vec<Vec<Rational>>,
        config: &LotteryConfig,
    ) -> Result<LotteryResult> {
        Self::run(&UtilityProfile::new(utilities)?, config)
    }

    /// Runs the pipeline and draws one assignment from the lottery, seeded
    /// by [`LotteryConfig::seed`].
    pub fn draw(utilities: &UtilityProfile, config: &LotteryConfig) -> Result<Draw> {
        let result = Self::run(utilities, config)?;
        let mut rng = create_rng(config.seed);
        let index = result.lottery.sample_index(&mut rng).ok_or_else(|| {
            LotteryError::invariant(
                "decomposition produced an empty lottery",
                result.representatives.rows().to_vec(),
            )
        })?;
        debug!("drew term {index} of {}", result.lottery.len());
        Ok(Draw { result, index })
    }

    /// Runs independent pipelines, one per profile, in input order.
    ///
    /// With the `parallel` feature and [`LotteryConfig::parallel`] set, the
    /// profiles are spread over the rayon thread pool.
    pub fn run_batch(
        profiles: &[UtilityProfile],
        config: &LotteryConfig,
    ) -> Vec<Result<LotteryResult>> {
        run_all(profiles, config)
    }
}

fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

#[cfg(feature = "parallel")]
fn run_all(profiles: &[UtilityProfile], config: &LotteryConfig) -> Vec<Result<LotteryResult>> {
    use rayon::prelude::*;

    if config.parallel {
        profiles
            .par_iter()
            .map(|profile| LotteryRunner::run(profile, config))
            .collect()
    } else {
        profiles
            .iter()
            .map(|profile| LotteryRunner::run(profile, config))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_all(profiles: &[UtilityProfile], config: &LotteryConfig) -> Vec<Result<LotteryResult>> {
    profiles
        .iter()
        .map(|profile| LotteryRunner::run(profile, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::{rational, ratio};

    fn utils(rows: &[Vec<i64>]) -> UtilityProfile {
        UtilityProfile::from_integers(rows).unwrap()
    }

    #[test]
    fn test_strict_scenario() {
        let result = LotteryRunner::run(&utils(&[vec![2, 1], vec![1, 2]]), &LotteryConfig::default())
            .unwrap();

        assert_eq!(result.profile.ranking(0), &[0, 1]);
        assert_eq!(result.profile.ranking(1), &[1, 0]);
        assert_eq!(
            result.allocation.rows(),
            &[
                vec![rational(1), rational(0)],
                vec![rational(0), rational(1)]
            ]
        );
        assert_eq!(result.representatives.rows(), result.allocation.rows());
        assert_eq!(result.lottery.len(), 1);
        assert_eq!(result.lottery.terms()[0].weight, rational(1));
        assert_eq!(
            result.lottery.terms()[0].assignment,
            vec![vec![1, 0], vec![0, 1]]
        );
    }

    #[test]
    fn test_tied_scenario() {
        let result = LotteryRunner::run(&utils(&[vec![1, 1], vec![1, 1]]), &LotteryConfig::default())
            .unwrap();

        assert_eq!(result.profile.ranking(0), &[0, 1]);
        assert_eq!(result.profile.ranking(1), &[0, 1]);
        let half = ratio(1, 2);
        assert_eq!(
            result.allocation.real_items(),
            vec![vec![half.clone(), half.clone()], vec![half.clone(), half.clone()]]
        );
        assert_eq!(result.lottery.len(), 2);
        assert!(result.lottery.iter().all(|term| term.weight == half));
        assert!(result
            .lottery
            .iter()
            .any(|term| term.assignment == vec![vec![1, 0], vec![0, 1]]));
        assert!(result
            .lottery
            .iter()
            .any(|term| term.assignment == vec![vec![0, 1], vec![1, 0]]));
    }

    #[test]
    fn test_padded_scenario() {
        let result = LotteryRunner::run(
            &utils(&[vec![4, 3, 2, 1], vec![4, 2, 3, 1], vec![1, 2, 3, 4]]),
            &LotteryConfig::default(),
        )
        .unwrap();

        assert_eq!(result.profile.copies(), 2);
        assert_eq!(result.ps_rounds, 6);
        assert_eq!(result.lottery.total_weight(), rational(1));
        assert_eq!(
            result.lottery.expected_allocation(),
            result.allocation.real_items()
        );
        assert_eq!(result.lottery.probability(2, 3), rational(1));
        assert_eq!(result.lottery.probability(0, 0), ratio(1, 2));
        assert_eq!(result.lottery.probability(1, 0), ratio(1, 2));
    }

    #[test]
    fn test_runs_are_idempotent() {
        let profile = utils(&[vec![5, 1, 3, 2, 4], vec![1, 2, 3, 4, 5], vec![5, 4, 3, 2, 1]]);
        let first = LotteryRunner::run(&profile, &LotteryConfig::default()).unwrap();
        let second = LotteryRunner::run(&profile, &LotteryConfig::default()).unwrap();
        assert_eq!(first.profile, second.profile);
        assert_eq!(first.allocation, second.allocation);
        assert_eq!(first.lottery, second.lottery);
    }

    #[test]
    fn test_run_matrix_validates() {
        let err = LotteryRunner::run_matrix(Vec::new(), &LotteryConfig::default()).unwrap_err();
        assert!(matches!(err, LotteryError::Validation(_)));

        let err = LotteryRunner::run_matrix(
            vec![vec![rational(1), rational(2)], vec![rational(1)]],
            &LotteryConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LotteryError::Validation(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = LotteryRunner::run(
            &utils(&[vec![1, 2]]),
            &LotteryConfig::default().with_max_terms(0),
        )
        .unwrap_err();
        assert!(matches!(err, LotteryError::Config(_)));
    }

    #[test]
    fn test_draw_is_seeded() {
        let profile = utils(&[vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]]);
        let config = LotteryConfig::default().with_seed(42);
        let a = LotteryRunner::draw(&profile, &config).unwrap();
        let b = LotteryRunner::draw(&profile, &config).unwrap();
        assert_eq!(a.index, b.index);
        assert_eq!(a.assignment(), b.assignment());
        assert!(a.term().weight > rational(0));
    }

    #[test]
    fn test_draw_single_term() {
        let profile = utils(&[vec![2, 1], vec![1, 2]]);
        let draw = LotteryRunner::draw(&profile, &LotteryConfig::default()).unwrap();
        assert_eq!(draw.index, 0);
        assert_eq!(draw.assignment(), &[vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_batch_preserves_order() {
        let profiles = vec![
            utils(&[vec![2, 1], vec![1, 2]]),
            utils(&[vec![1, 1], vec![1, 1]]),
            utils(&[vec![1]]),
        ];
        for parallel in [false, true] {
            let config = LotteryConfig::default().with_parallel(parallel);
            let results = LotteryRunner::run_batch(&profiles, &config);
            let lengths: Vec<usize> = results
                .iter()
                .map(|r| r.as_ref().unwrap().lottery.len())
                .collect();
            assert_eq!(lengths, vec![1, 2, 1]);
        }
    }
}
