//! Fractional allocation produced by simultaneous eating.

use crate::error::{LotteryError, Result};
use crate::rational::{column_sums, row_sum, Rational};

/// A divisible allocation: `n` agents × `t` columns (real items then dummies).
///
/// Entry `(a, j)` is the amount of column `j` that agent `a` consumed.
/// Every column sums to at most 1. Each row sums to the agent's demand,
/// which is `c` units: one per representative.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "FractionalParts")
)]
pub struct FractionalAllocation {
    items: usize,
    rows: Vec<Vec<Rational>>,
}

impl FractionalAllocation {
    /// Wraps a raw `n × t` matrix whose first `items` columns are real.
    ///
    /// # Errors
    /// [`LotteryError::Validation`] if the matrix is empty or ragged, or
    /// if `items` exceeds the number of columns.
    pub fn from_rows(rows: Vec<Vec<Rational>>, items: usize) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || columns == 0 {
            return Err(LotteryError::Validation("allocation is empty".into()));
        }
        if rows.iter().any(|row| row.len() != columns) {
            return Err(LotteryError::Validation(
                "allocation rows differ in length".into(),
            ));
        }
        if items > columns {
            return Err(LotteryError::Validation(format!(
                "{items} real items but only {columns} columns"
            )));
        }
        Ok(Self { items, rows })
    }

    pub(crate) fn new_unchecked(rows: Vec<Vec<Rational>>, items: usize) -> Self {
        Self { items, rows }
    }

    /// Number of agents (`n`).
    pub fn agent_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of real items (`m`).
    pub fn item_count(&self) -> usize {
        self.items
    }

    /// Number of columns including dummies (`t`).
    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }

    /// Amount of `column` held by `agent`.
    pub fn get(&self, agent: usize, column: usize) -> &Rational {
        &self.rows[agent][column]
    }

    /// Row of `agent` across all columns.
    pub fn row(&self, agent: usize) -> &[Rational] {
        &self.rows[agent]
    }

    /// The full `n × t` matrix.
    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.rows
    }

    /// The allocation restricted to real items (`n × m`), dummies dropped.
    pub fn real_items(&self) -> Vec<Vec<Rational>> {
        self.rows
            .iter()
            .map(|row| row[..self.items].to_vec())
            .collect()
    }

    /// Total consumption of each agent.
    pub fn row_sums(&self) -> Vec<Rational> {
        self.rows.iter().map(|row| row_sum(row)).collect()
    }

    /// Total consumption of each column.
    pub fn column_sums(&self) -> Vec<Rational> {
        column_sums(&self.rows, self.column_count())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FractionalParts {
    items: usize,
    rows: Vec<Vec<Rational>>,
}

#[cfg(feature = "serde")]
impl TryFrom<FractionalParts> for FractionalAllocation {
    type Error = LotteryError;

    fn try_from(parts: FractionalParts) -> Result<Self> {
        Self::from_rows(parts.rows, parts.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::{rational, ratio};

    #[test]
    fn test_from_rows_validation() {
        assert!(FractionalAllocation::from_rows(vec![], 0).is_err());
        assert!(FractionalAllocation::from_rows(vec![vec![rational(1)], vec![]], 1).is_err());
        assert!(FractionalAllocation::from_rows(vec![vec![rational(1)]], 2).is_err());
    }

    #[test]
    fn test_real_items_drops_dummies() {
        let alloc = FractionalAllocation::from_rows(
            vec![
                vec![ratio(1, 2), ratio(1, 2), rational(0)],
                vec![ratio(1, 2), ratio(1, 4), ratio(1, 4)],
            ],
            2,
        )
        .unwrap();
        assert_eq!(alloc.column_count(), 3);
        assert_eq!(
            alloc.real_items(),
            vec![
                vec![ratio(1, 2), ratio(1, 2)],
                vec![ratio(1, 2), ratio(1, 4)]
            ]
        );
        assert_eq!(alloc.row_sums(), vec![rational(1), rational(1)]);
        assert_eq!(
            alloc.column_sums(),
            vec![rational(1), ratio(3, 4), ratio(1, 4)]
        );
    }
}
