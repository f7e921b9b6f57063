//! Square allocation over unit-demand representatives.

use crate::error::{LotteryError, Result};
use crate::rational::{column_sums, Rational};
use num_traits::Zero;

/// A `(c·n) × (c·n)` allocation in which every row has unit demand.
///
/// Rows `k·c .. (k+1)·c` are the representatives of agent `k`, ordered so
/// that earlier representatives hold the agent's more preferred items.
/// Every row sums to 1, and because supply and demand balance, every column
/// does as well: the matrix is doubly stochastic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RepresentativeParts")
)]
pub struct RepresentativeAllocation {
    pub(crate) items: usize,
    pub(crate) copies: usize,
    pub(crate) rows: Vec<Vec<Rational>>,
}

impl RepresentativeAllocation {
    /// Wraps a square matrix of `copies` representatives per agent whose
    /// first `items` columns are real items.
    ///
    /// Only the shape is checked; a matrix that is not doubly stochastic is
    /// accepted here and reported by the decomposition.
    ///
    /// # Errors
    /// [`LotteryError::Validation`] if the matrix is empty or not square,
    /// `copies` is zero or does not divide the size, or `items` exceeds it.
    pub fn from_rows(rows: Vec<Vec<Rational>>, items: usize, copies: usize) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(LotteryError::Validation("allocation is empty".into()));
        }
        if rows.iter().any(|row| row.len() != size) {
            return Err(LotteryError::Validation(format!(
                "allocation must be {size}x{size}"
            )));
        }
        if copies == 0 || size % copies != 0 {
            return Err(LotteryError::Validation(format!(
                "{size} rows cannot be split into blocks of {copies}"
            )));
        }
        if items > size {
            return Err(LotteryError::Validation(format!(
                "{items} real items but only {size} columns"
            )));
        }
        Ok(Self {
            items,
            copies,
            rows,
        })
    }

    /// Number of rows and of columns (`c·n`).
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Number of original agents (`n`).
    pub fn agent_count(&self) -> usize {
        self.rows.len() / self.copies
    }

    /// Number of real items (`m`).
    pub fn item_count(&self) -> usize {
        self.items
    }

    /// Representatives per agent (`c`).
    pub fn copies(&self) -> usize {
        self.copies
    }

    /// Agent owning representative `row`.
    pub fn owner(&self, row: usize) -> usize {
        row / self.copies
    }

    /// Representative rows of `agent`.
    pub fn block(&self, agent: usize) -> &[Vec<Rational>] {
        &self.rows[agent * self.copies..(agent + 1) * self.copies]
    }

    /// The full square matrix.
    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.rows
    }

    /// Sums each agent's representatives back together, real items only.
    ///
    /// This reproduces the fractional allocation the representatives were
    /// split from, with dummy columns dropped.
    pub fn collapsed_real_items(&self) -> Vec<Vec<Rational>> {
        (0..self.agent_count())
            .map(|agent| {
                let block = self.block(agent);
                let mut sums = column_sums(block, self.size());
                sums.truncate(self.items);
                sums
            })
            .collect()
    }

    /// Number of strictly positive entries.
    pub fn support_len(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|value| !value.is_zero())
            .count()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RepresentativeParts {
    items: usize,
    copies: usize,
    rows: Vec<Vec<Rational>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RepresentativeParts> for RepresentativeAllocation {
    type Error = LotteryError;

    fn try_from(parts: RepresentativeParts) -> Result<Self> {
        Self::from_rows(parts.rows, parts.items, parts.copies)
    }
}
