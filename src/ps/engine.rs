//! Simultaneous-eating loop.

use super::types::FractionalAllocation;
use crate::preference::OrdinalProfile;
use crate::rational::Rational;
use log::trace;
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Result of a Probabilistic Serial run.
#[derive(Debug, Clone)]
pub struct PsResult {
    /// The fractional allocation, `n × t`.
    pub allocation: FractionalAllocation,

    /// Number of eating rounds. Each round exhausts at least one column.
    pub rounds: usize,
}

/// Executes the Probabilistic Serial mechanism.
///
/// All agents eat their favourite remaining column at unit speed. A round
/// lasts until the first favourite runs out; exhausted columns are then
/// struck from every ranking and the agents move on. The loop ends when
/// every ranking is empty.
///
/// # Examples
///
/// ```
/// use u_lottery::preference::{PreferenceBuilder, UtilityProfile};
/// use u_lottery::ps::PsEngine;
/// use u_lottery::rational::ratio;
///
/// let utils = UtilityProfile::from_integers(&[vec![1, 1], vec![1, 1]]).unwrap();
/// let result = PsEngine::run(&PreferenceBuilder::build(&utils));
///
/// assert_eq!(result.rounds, 2);
/// assert_eq!(result.allocation.get(0, 0), &ratio(1, 2));
/// assert_eq!(result.allocation.get(1, 1), &ratio(1, 2));
/// ```
pub struct PsEngine;

impl PsEngine {
    /// Runs PS over the given rankings.
    ///
    /// The rankings are copied; `profile` is left untouched.
    pub fn run(profile: &OrdinalProfile) -> PsResult {
        let agents = profile.agent_count();
        let columns = profile.column_count();

        let mut rankings: Vec<Vec<usize>> = profile.rankings().to_vec();
        let mut supply = vec![Rational::one(); columns];
        let mut rows = vec![vec![Rational::zero(); columns]; agents];
        let mut rounds = 0usize;

        while rankings.iter().any(|ranking| !ranking.is_empty()) {
            let mut eaters = vec![0usize; columns];
            for favourite in rankings.iter().filter_map(|ranking| ranking.first()) {
                eaters[*favourite] += 1;
            }

            // Largest step that keeps every supply non-negative.
            let mut step = Rational::one();
            for (column, &count) in eaters.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let rate = &supply[column] / Rational::from_integer(BigInt::from(count));
                if rate < step {
                    step = rate;
                }
            }

            for (agent, ranking) in rankings.iter().enumerate() {
                if let Some(&favourite) = ranking.first() {
                    rows[agent][favourite] += &step;
                    supply[favourite] -= &step;
                }
            }

            for ranking in rankings.iter_mut() {
                ranking.retain(|&column| !supply[column].is_zero());
            }

            rounds += 1;
            trace!(
                "ps round {rounds}: step {step}, {} columns exhausted",
                supply.iter().filter(|s| s.is_zero()).count()
            );
        }

        PsResult {
            allocation: FractionalAllocation::new_unchecked(rows, profile.item_count()),
            rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::{PreferenceBuilder, UtilityProfile};
    use crate::rational::{rational, ratio};

    fn run(rows: &[Vec<i64>]) -> (OrdinalProfile, PsResult) {
        let profile = PreferenceBuilder::build(&UtilityProfile::from_integers(rows).unwrap());
        let result = PsEngine::run(&profile);
        (profile, result)
    }

    #[test]
    fn test_disjoint_favourites() {
        let (_, result) = run(&[vec![2, 1], vec![1, 2]]);
        assert_eq!(
            result.allocation.rows(),
            &[
                vec![rational(1), rational(0)],
                vec![rational(0), rational(1)]
            ]
        );
        assert_eq!(result.rounds, 1);
    }

    #[test]
    fn test_identical_preferences_split_evenly() {
        let (_, result) = run(&[vec![1, 1], vec![1, 1]]);
        let half = ratio(1, 2);
        assert_eq!(
            result.allocation.rows(),
            &[vec![half.clone(), half.clone()], vec![half.clone(), half]]
        );
    }

    #[test]
    fn test_padded_profile() {
        let (profile, result) = run(&[vec![4, 3, 2, 1], vec![4, 2, 3, 1], vec![1, 2, 3, 4]]);
        let alloc = &result.allocation;
        let third = ratio(1, 3);
        let zero = rational(0);

        assert_eq!(
            alloc.row(0),
            &[ratio(1, 2), ratio(5, 6), zero.clone(), zero.clone(), third.clone(), third.clone()]
        );
        assert_eq!(
            alloc.row(1),
            &[ratio(1, 2), ratio(1, 12), ratio(3, 4), zero.clone(), third.clone(), third.clone()]
        );
        assert_eq!(
            alloc.row(2),
            &[zero, ratio(1, 12), ratio(1, 4), rational(1), third.clone(), third]
        );

        // Each agent eats one unit per representative.
        for sum in alloc.row_sums() {
            assert_eq!(sum, rational(profile.copies() as i64));
        }
        for sum in alloc.column_sums() {
            assert_eq!(sum, rational(1));
        }
    }

    #[test]
    fn test_profile_not_mutated() {
        let (profile, first) = run(&[vec![3, 1, 2], vec![1, 2, 3]]);
        let before = profile.clone();
        let second = PsEngine::run(&profile);
        assert_eq!(profile, before);
        assert_eq!(first.allocation, second.allocation);
        assert_eq!(first.rounds, second.rounds);
    }

    #[test]
    fn test_single_agent_takes_everything() {
        let (profile, result) = run(&[vec![1, 5, 3]]);
        assert_eq!(profile.copies(), 3);
        assert_eq!(
            result.allocation.row(0),
            &[rational(1), rational(1), rational(1)]
        );
        assert_eq!(result.rounds, 3);
    }

    #[test]
    fn test_more_agents_than_items() {
        let (_, result) = run(&[vec![1], vec![1], vec![1]]);
        // Item 0 is shared, then dummies 1 and 2 are shared.
        for agent in 0..3 {
            assert_eq!(result.allocation.row(agent), &[ratio(1, 3), ratio(1, 3), ratio(1, 3)]);
        }
        assert_eq!(result.allocation.real_items(), vec![vec![ratio(1, 3)]; 3]);
    }
}
