//! Birkhoff–von Neumann extraction loop.

use super::config::DecompositionConfig;
use super::types::{Lottery, LotteryTerm};
use crate::error::{LotteryError, Result};
use crate::matching::BipartiteMatcher;
use crate::rational::Rational;
use crate::representative::RepresentativeAllocation;
use log::{debug, trace};
use num_traits::{One, Signed, Zero};

/// Decomposes a doubly stochastic representative allocation into a lottery.
///
/// Each round finds a perfect matching on the positive entries of the
/// working matrix, takes the smallest matched entry as the weight, and
/// subtracts it along the matching. At least one entry drops to zero per
/// round, so the loop ends after at most as many rounds as there are
/// positive entries. Matchings are collapsed from representatives to agents
/// by summing each agent's block of rows; matches to dummy columns leave no
/// trace in the assignment.
///
/// # Examples
///
/// ```
/// use u_lottery::decomposition::{DecompositionConfig, Decomposer};
/// use u_lottery::preference::{PreferenceBuilder, UtilityProfile};
/// use u_lottery::ps::PsEngine;
/// use u_lottery::rational::ratio;
/// use u_lottery::representative::RepresentativeSplitter;
///
/// let utils = UtilityProfile::from_integers(&[vec![1, 1], vec![1, 1]]).unwrap();
/// let profile = PreferenceBuilder::build(&utils);
/// let allocation = PsEngine::run(&profile).allocation;
/// let reps = RepresentativeSplitter::split(&profile, &allocation).unwrap();
///
/// let lottery = Decomposer::decompose(&reps, &DecompositionConfig::default()).unwrap();
/// assert_eq!(lottery.len(), 2);
/// assert!(lottery.iter().all(|term| term.weight == ratio(1, 2)));
/// ```
pub struct Decomposer;

impl Decomposer {
    /// Runs the decomposition. `allocation` is copied, not modified.
    ///
    /// # Errors
    /// - [`LotteryError::Config`] for an invalid configuration.
    /// - [`LotteryError::InternalInvariantViolation`] if the matrix has no
    ///   perfect matching at some round, the term limit is hit, or
    ///   verification fails.
    pub fn decompose(
        allocation: &RepresentativeAllocation,
        config: &DecompositionConfig,
    ) -> Result<Lottery> {
        config.validate()?;

        let size = allocation.size();
        let items = allocation.item_count();
        let copies = allocation.copies();

        let mut working: Vec<Vec<Rational>> = allocation.rows().to_vec();
        let mut positive = working
            .iter()
            .flatten()
            .filter(|value| value.is_positive())
            .count();
        let mut terms: Vec<LotteryTerm> = Vec::new();

        while positive > 0 {
            if let Some(limit) = config.max_terms {
                if terms.len() >= limit {
                    return Err(LotteryError::invariant(
                        format!("decomposition needs more than {limit} terms"),
                        working,
                    ));
                }
            }

            let matching = BipartiteMatcher::find_perfect_matching(working.as_slice())?;
            let weight = matching
                .iter()
                .enumerate()
                .map(|(rep, &column)| &working[rep][column])
                .min()
                .cloned()
                .ok_or_else(|| LotteryError::invariant("empty matching", working.clone()))?;

            let mut discrete = vec![vec![0u32; items]; size];
            for (rep, &column) in matching.iter().enumerate() {
                if column < items {
                    discrete[rep][column] = 1;
                }
                let entry = &mut working[rep][column];
                *entry -= &weight;
                if entry.is_zero() {
                    positive -= 1;
                }
            }

            trace!(
                "term {}: weight {weight}, {positive} positive entries left",
                terms.len()
            );
            terms.push(LotteryTerm {
                weight,
                assignment: collapse(&discrete, copies),
                matching,
            });
        }

        let extracted = terms.len();
        let mut lottery = Lottery {
            agents: allocation.agent_count(),
            items,
            copies,
            terms,
        };
        if config.merge_duplicates {
            lottery = lottery.merge_duplicates();
        }
        if config.verify {
            verify(&lottery, allocation)?;
        }

        debug!(
            "decomposed {size}x{size} allocation into {} terms ({extracted} matchings)",
            lottery.len()
        );
        Ok(lottery)
    }
}

/// Sums each block of `copies` representative rows into one agent row.
fn collapse(discrete: &[Vec<u32>], copies: usize) -> Vec<Vec<u32>> {
    discrete
        .chunks(copies)
        .map(|block| {
            let mut row = vec![0u32; block.first().map_or(0, Vec::len)];
            for rep in block {
                for (sum, &value) in row.iter_mut().zip(rep) {
                    *sum += value;
                }
            }
            row
        })
        .collect()
}

/// Checks that the weights sum to 1 and reproduce the allocation.
fn verify(lottery: &Lottery, allocation: &RepresentativeAllocation) -> Result<()> {
    let total = lottery.total_weight();
    if !total.is_one() {
        return Err(LotteryError::invariant(
            format!("lottery weights sum to {total}"),
            allocation.rows().to_vec(),
        ));
    }
    let expected = allocation.collapsed_real_items();
    if lottery.expected_allocation() != expected {
        return Err(LotteryError::invariant(
            "weighted assignments do not reproduce the allocation",
            expected,
        ));
    }
    Ok(())
}
