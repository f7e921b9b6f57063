//! Support graphs and matchings.

use crate::error::{LotteryError, Result};
use crate::rational::{rational, Rational};
use num_traits::Signed;

/// A square bipartite graph: `size` left vertices, `size` right vertices.
///
/// Implemented for square rational matrices (an edge wherever the entry is
/// strictly positive) and for boolean adjacency matrices.
pub trait SupportGraph {
    /// Number of vertices on each side.
    fn size(&self) -> usize;

    /// Whether left vertex `left` is adjacent to right vertex `right`.
    fn has_edge(&self, left: usize, right: usize) -> bool;

    /// Checks that the graph really has `size` vertices on each side.
    ///
    /// # Errors
    /// [`LotteryError::Validation`] if it does not.
    fn check_square(&self) -> Result<()> {
        Ok(())
    }

    /// The graph as a matrix, for error diagnostics.
    ///
    /// The default renders the adjacency as 0/1 entries.
    fn snapshot(&self) -> Vec<Vec<Rational>> {
        (0..self.size())
            .map(|left| {
                (0..self.size())
                    .map(|right| rational(i64::from(self.has_edge(left, right))))
                    .collect()
            })
            .collect()
    }
}

impl SupportGraph for [Vec<Rational>] {
    fn size(&self) -> usize {
        self.len()
    }

    fn has_edge(&self, left: usize, right: usize) -> bool {
        self[left][right].is_positive()
    }

    fn check_square(&self) -> Result<()> {
        square_rows(self)
    }

    fn snapshot(&self) -> Vec<Vec<Rational>> {
        self.to_vec()
    }
}

impl SupportGraph for [Vec<bool>] {
    fn size(&self) -> usize {
        self.len()
    }

    fn has_edge(&self, left: usize, right: usize) -> bool {
        self[left][right]
    }

    fn check_square(&self) -> Result<()> {
        square_rows(self)
    }
}

fn square_rows<T>(rows: &[Vec<T>]) -> Result<()> {
    let size = rows.len();
    match rows.iter().position(|row| row.len() != size) {
        Some(left) => Err(LotteryError::Validation(format!(
            "support row {left} has {} entries, expected {size}",
            rows[left].len()
        ))),
        None => Ok(()),
    }
}

/// A (not necessarily perfect) matching of left vertices to right vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    pub(crate) mates: Vec<Option<usize>>,
}

impl Matching {
    /// Right vertex matched to `left`, if any.
    pub fn mate(&self, left: usize) -> Option<usize> {
        self.mates[left]
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.mates.iter().flatten().count()
    }

    /// Whether no pair is matched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every left vertex is matched.
    pub fn is_perfect(&self) -> bool {
        self.mates.iter().all(Option::is_some)
    }

    /// Matched `(left, right)` pairs in left order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mates
            .iter()
            .enumerate()
            .filter_map(|(left, mate)| mate.map(|right| (left, right)))
    }

    /// The right mate of every left vertex, or `None` if the matching is not perfect.
    pub fn into_perfect(self) -> Option<Vec<usize>> {
        self.mates.into_iter().collect()
    }
}
