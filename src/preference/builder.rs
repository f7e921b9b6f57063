//! Utility matrix to padded ordinal rankings.

use super::types::{OrdinalProfile, UtilityProfile};
use crate::error::Result;
use crate::rational::{rational, Rational};

/// Turns cardinal utilities into strict rankings over `c·n` columns.
///
/// Each agent's row is padded with `c·n − m` dummy items valued one below
/// the global minimum utility, so dummies rank below every real item. Items
/// are ordered by descending utility; ties go to the lower index. Dummies
/// share a value and are therefore ordered by index among themselves.
///
/// # Examples
///
/// ```
/// use u_lottery::preference::{PreferenceBuilder, UtilityProfile};
///
/// let utils = UtilityProfile::from_integers(&[vec![1, 3, 2], vec![3, 2, 1]]).unwrap();
/// let profile = PreferenceBuilder::build(&utils);
///
/// assert_eq!(profile.copies(), 2);
/// assert_eq!(profile.ranking(0), &[1, 2, 0, 3]);
/// assert_eq!(profile.ranking(1), &[0, 1, 2, 3]);
/// ```
pub struct PreferenceBuilder;

impl PreferenceBuilder {
    /// Builds the ordinal profile of a validated utility profile.
    pub fn build(utilities: &UtilityProfile) -> OrdinalProfile {
        let agents = utilities.agent_count();
        let items = utilities.item_count();
        let copies = items.div_ceil(agents);
        let columns = copies * agents;
        let dummy_value = utilities.min_utility() - rational(1);

        let rankings = utilities
            .rows()
            .iter()
            .map(|row| rank(row, &dummy_value, columns))
            .collect();

        OrdinalProfile {
            items,
            copies,
            rankings,
        }
    }

    /// Validates a raw utility matrix, then builds its ordinal profile.
    ///
    /// # Errors
    /// [`LotteryError::Validation`](crate::LotteryError::Validation) for an
    /// empty or ragged matrix.
    pub fn build_from_rows(utilities: Vec<Vec<Rational>>) -> Result<OrdinalProfile> {
        UtilityProfile::new(utilities).map(|profile| Self::build(&profile))
    }
}

/// Sorts `0..columns` by (descending value, ascending index).
fn rank(row: &[Rational], dummy_value: &Rational, columns: usize) -> Vec<usize> {
    let value = |column: usize| row.get(column).unwrap_or(dummy_value);
    let mut order: Vec<usize> = (0..columns).collect();
    order.sort_by(|&a, &b| value(b).cmp(value(a)).then(a.cmp(&b)));
    order
}
