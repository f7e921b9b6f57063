//! Cardinal and ordinal preference profiles.

use crate::error::{LotteryError, Result};
use crate::rational::{rational, Rational};

/// Cardinal utilities: `n` agents × `m` items.
///
/// Construction validates the matrix, so every `UtilityProfile` has at
/// least one agent, at least one item, and rows of equal length.
///
/// # Examples
///
/// ```
/// use u_lottery::preference::UtilityProfile;
///
/// let profile = UtilityProfile::from_integers(&[vec![2, 1], vec![1, 2]]).unwrap();
/// assert_eq!(profile.agent_count(), 2);
/// assert_eq!(profile.item_count(), 2);
///
/// assert!(UtilityProfile::from_integers(&[vec![1, 2], vec![3]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<Rational>>", into = "Vec<Vec<Rational>>")
)]
pub struct UtilityProfile {
    utilities: Vec<Vec<Rational>>,
}

impl UtilityProfile {
    /// Creates a profile from one utility row per agent.
    ///
    /// # Errors
    /// [`LotteryError::Validation`] if there are no agents, no items, or
    /// rows of differing lengths.
    pub fn new(utilities: Vec<Vec<Rational>>) -> Result<Self> {
        let Some(first) = utilities.first() else {
            return Err(LotteryError::Validation(
                "utility matrix has no agents".into(),
            ));
        };
        let items = first.len();
        if items == 0 {
            return Err(LotteryError::Validation(
                "utility matrix has no items".into(),
            ));
        }
        if let Some((agent, row)) = utilities
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != items)
        {
            return Err(LotteryError::Validation(format!(
                "agent {agent} has {} utilities, expected {items}",
                row.len()
            )));
        }
        Ok(Self { utilities })
    }

    /// Creates a profile from integer utilities.
    pub fn from_integers(utilities: &[Vec<i64>]) -> Result<Self> {
        Self::new(
            utilities
                .iter()
                .map(|row| row.iter().map(|&u| rational(u)).collect())
                .collect(),
        )
    }

    /// Number of agents (`n`).
    pub fn agent_count(&self) -> usize {
        self.utilities.len()
    }

    /// Number of real items (`m`).
    pub fn item_count(&self) -> usize {
        self.utilities[0].len()
    }

    /// Utility rows, one per agent.
    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.utilities
    }

    /// Utility of `item` for `agent`.
    pub fn utility(&self, agent: usize, item: usize) -> &Rational {
        &self.utilities[agent][item]
    }

    /// Smallest utility anywhere in the matrix.
    pub fn min_utility(&self) -> &Rational {
        self.utilities
            .iter()
            .flatten()
            .min()
            .unwrap_or(&self.utilities[0][0])
    }
}

impl TryFrom<Vec<Vec<Rational>>> for UtilityProfile {
    type Error = LotteryError;

    fn try_from(utilities: Vec<Vec<Rational>>) -> Result<Self> {
        Self::new(utilities)
    }
}

impl From<UtilityProfile> for Vec<Vec<Rational>> {
    fn from(profile: UtilityProfile) -> Self {
        profile.utilities
    }
}

/// Strict rankings over real and dummy items.
///
/// Holds `n` rankings of `t = c·n` column indices each, where
/// `c = ceil(m / n)`. Columns `0..m` are the real items; columns `m..t` are
/// dummy items, valued below every real item and distinct from one another.
/// Each ranking is a permutation of `0..t`, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "OrdinalParts")
)]
pub struct OrdinalProfile {
    pub(crate) items: usize,
    pub(crate) copies: usize,
    pub(crate) rankings: Vec<Vec<usize>>,
}

impl OrdinalProfile {
    /// Wraps precomputed rankings over `copies · n` columns whose first
    /// `items` columns are real.
    ///
    /// # Errors
    /// [`LotteryError::Validation`] if there are no agents, `copies` is
    /// zero, `items` exceeds the column count, or some ranking is not a
    /// permutation of the columns.
    pub fn from_rankings(rankings: Vec<Vec<usize>>, items: usize, copies: usize) -> Result<Self> {
        if rankings.is_empty() {
            return Err(LotteryError::Validation("profile has no agents".into()));
        }
        if copies == 0 {
            return Err(LotteryError::Validation(
                "agents need at least one representative".into(),
            ));
        }
        let columns = copies * rankings.len();
        if items > columns {
            return Err(LotteryError::Validation(format!(
                "{items} real items but only {columns} columns"
            )));
        }
        for (agent, ranking) in rankings.iter().enumerate() {
            let mut seen = vec![false; columns];
            let mut is_permutation = ranking.len() == columns;
            for &column in ranking {
                if column >= columns || seen[column] {
                    is_permutation = false;
                    break;
                }
                seen[column] = true;
            }
            if !is_permutation {
                return Err(LotteryError::Validation(format!(
                    "ranking of agent {agent} is not a permutation of 0..{columns}"
                )));
            }
        }
        Ok(Self {
            items,
            copies,
            rankings,
        })
    }

    /// Number of agents (`n`).
    pub fn agent_count(&self) -> usize {
        self.rankings.len()
    }

    /// Number of real items (`m`).
    pub fn item_count(&self) -> usize {
        self.items
    }

    /// Representatives per agent (`c = ceil(m / n)`).
    pub fn copies(&self) -> usize {
        self.copies
    }

    /// Total number of columns, real and dummy (`t = c·n`).
    pub fn column_count(&self) -> usize {
        self.copies * self.rankings.len()
    }

    /// Number of dummy columns (`c·n − m`).
    pub fn dummy_count(&self) -> usize {
        self.column_count() - self.items
    }

    /// Whether `column` is a dummy item.
    pub fn is_dummy(&self, column: usize) -> bool {
        column >= self.items
    }

    /// Ranking of `agent`, most preferred column first.
    pub fn ranking(&self, agent: usize) -> &[usize] {
        &self.rankings[agent]
    }

    /// All rankings, one per agent.
    pub fn rankings(&self) -> &[Vec<usize>] {
        &self.rankings
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct OrdinalParts {
    items: usize,
    copies: usize,
    rankings: Vec<Vec<usize>>,
}

#[cfg(feature = "serde")]
impl TryFrom<OrdinalParts> for OrdinalProfile {
    type Error = LotteryError;

    fn try_from(parts: OrdinalParts) -> Result<Self> {
        Self::from_rankings(parts.rankings, parts.items, parts.copies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_no_agents() {
        let err = UtilityProfile::new(Vec::new()).unwrap_err();
        assert_eq!(
            err,
            LotteryError::Validation("utility matrix has no agents".into())
        );
    }

    #[test]
    fn test_rejects_no_items() {
        let err = UtilityProfile::from_integers(&[vec![], vec![]]).unwrap_err();
        assert!(matches!(err, LotteryError::Validation(_)));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = UtilityProfile::from_integers(&[vec![1, 2], vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            LotteryError::Validation("agent 2 has 1 utilities, expected 2".into())
        );
    }

    #[test]
    fn test_min_utility() {
        let profile = UtilityProfile::from_integers(&[vec![4, -3], vec![0, 7]]).unwrap();
        assert_eq!(profile.min_utility(), &rational(-3));
        assert_eq!(profile.utility(1, 1), &rational(7));
    }

    #[test]
    fn test_try_from_round_trip() {
        let rows = vec![vec![rational(1), rational(2)]];
        let profile = UtilityProfile::try_from(rows.clone()).unwrap();
        assert_eq!(Vec::from(profile), rows);
    }

    #[test]
    fn test_from_rankings_accepts_permutations() {
        let profile =
            OrdinalProfile::from_rankings(vec![vec![1, 0, 3, 2], vec![3, 2, 1, 0]], 3, 2).unwrap();
        assert_eq!(profile.column_count(), 4);
        assert_eq!(profile.dummy_count(), 1);
        assert_eq!(profile.ranking(1), &[3, 2, 1, 0]);
    }

    #[test]
    fn test_from_rankings_rejects_bad_shapes() {
        for (rankings, items, copies) in [
            (Vec::new(), 0, 1),
            (vec![vec![0]], 1, 0),
            (vec![vec![0]], 2, 1),
            (vec![vec![7]], 1, 1),
            (vec![vec![0, 0]], 1, 2),
            (vec![vec![0]], 1, 2),
        ] {
            let err = OrdinalProfile::from_rankings(rankings, items, copies).unwrap_err();
            assert!(matches!(err, LotteryError::Validation(_)));
        }
    }
}
