//! Augmenting-path matcher.

use super::types::{Matching, SupportGraph};
use crate::error::{LotteryError, Result};
use std::collections::VecDeque;

/// Finds maximum matchings in square bipartite graphs.
///
/// Vertices are numbered as one array: left vertices are `0..size`, right
/// vertices are `size..2·size`. Each round runs a breadth-first search from
/// all unmatched left vertices along alternating paths and stops at the first
/// unmatched right vertex it reaches; the path found is then flipped, growing
/// the matching by one. Rounds repeat until no augmenting path remains.
///
/// One path per search is simpler than phase-batched Hopcroft–Karp and
/// reaches a matching of the same size.
///
/// # Examples
///
/// ```
/// use u_lottery::matching::BipartiteMatcher;
///
/// let adjacency = vec![
///     vec![true, true, false],
///     vec![true, false, false],
///     vec![false, true, true],
/// ];
/// let mates = BipartiteMatcher::find_perfect_matching(adjacency.as_slice()).unwrap();
/// assert_eq!(mates, vec![1, 0, 2]);
/// ```
pub struct BipartiteMatcher;

impl BipartiteMatcher {
    /// Computes a maximum matching of `graph`.
    ///
    /// # Panics
    /// If a row of a matrix-backed graph is shorter than its size; use
    /// [`SupportGraph::check_square`] first on untrusted input.
    pub fn maximum_matching<G: SupportGraph + ?Sized>(graph: &G) -> Matching {
        let size = graph.size();
        let mut mates: Vec<Option<usize>> = vec![None; 2 * size];

        while let Some(path) = augmenting_path(graph, &mates) {
            for (i, &vertex) in path.iter().enumerate() {
                mates[vertex] = if vertex < size {
                    Some(path[i + 1])
                } else {
                    Some(path[i - 1])
                };
            }
        }

        mates.truncate(size);
        Matching {
            mates: mates
                .into_iter()
                .map(|mate| mate.map(|right| right - size))
                .collect(),
        }
    }

    /// Computes a perfect matching: entry `l` of the result is the right
    /// vertex matched to left vertex `l`.
    ///
    /// # Errors
    /// - [`LotteryError::Validation`] if the graph is not square.
    /// - [`LotteryError::InternalInvariantViolation`] if the graph has no
    ///   perfect matching. Supports of doubly stochastic matrices always
    ///   have one, so this indicates a broken upstream invariant.
    pub fn find_perfect_matching<G: SupportGraph + ?Sized>(graph: &G) -> Result<Vec<usize>> {
        graph.check_square()?;
        let matching = Self::maximum_matching(graph);
        let matched = matching.len();
        matching.into_perfect().ok_or_else(|| {
            LotteryError::invariant(
                format!(
                    "support admits a matching of only {matched} of {} vertices",
                    graph.size()
                ),
                graph.snapshot(),
            )
        })
    }
}

/// Whether `from` and `to` are adjacent (one on each side).
fn connected<G: SupportGraph + ?Sized>(graph: &G, from: usize, to: usize) -> bool {
    let size = graph.size();
    if from < size {
        graph.has_edge(from, to - size)
    } else {
        graph.has_edge(to, from - size)
    }
}

/// Alternating-path rule: left to right only along unmatched edges,
/// right to left only along the matched edge.
fn allowable(mates: &[Option<usize>], from: usize, to: usize, size: usize) -> bool {
    if from < size {
        mates[from] != Some(to)
    } else {
        mates[to] == Some(from)
    }
}

/// BFS for a path from an unmatched left vertex to an unmatched right vertex.
///
/// Returns the vertices along the path, left endpoint first.
fn augmenting_path<G: SupportGraph + ?Sized>(
    graph: &G,
    mates: &[Option<usize>],
) -> Option<Vec<usize>> {
    let size = graph.size();
    let mut found = vec![false; 2 * size];
    let mut pred: Vec<Option<usize>> = vec![None; 2 * size];
    let mut queue = VecDeque::new();

    for (left, mate) in mates[..size].iter().enumerate() {
        if mate.is_none() {
            found[left] = true;
            queue.push_back(left);
        }
    }

    let mut end = None;
    while let Some(vertex) = queue.pop_front() {
        if vertex >= size && mates[vertex].is_none() {
            end = Some(vertex);
            break;
        }
        let base = if vertex >= size { 0 } else { size };
        for next in base..base + size {
            if found[next]
                || !connected(graph, vertex, next)
                || !allowable(mates, vertex, next, size)
            {
                continue;
            }
            found[next] = true;
            pred[next] = Some(vertex);
            queue.push_back(next);
        }
    }

    let mut vertex = end?;
    let mut path = VecDeque::from([vertex]);
    while let Some(prev) = pred[vertex] {
        path.push_front(prev);
        vertex = prev;
    }
    Some(path.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational::{rational, ratio, Rational};

    fn is_valid_perfect(adjacency: &[Vec<bool>], mates: &[usize]) -> bool {
        let mut used = vec![false; adjacency.len()];
        mates.iter().enumerate().all(|(left, &right)| {
            let fresh = !used[right];
            used[right] = true;
            fresh && adjacency[left][right]
        })
    }

    #[test]
    fn test_identity_support() {
        let adjacency: Vec<Vec<bool>> = (0..4)
            .map(|i| (0..4).map(|j| i == j).collect())
            .collect();
        let mates = BipartiteMatcher::find_perfect_matching(adjacency.as_slice()).unwrap();
        assert_eq!(mates, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_requires_augmentation() {
        // Greedy left-to-right would match 0-0 and strand 1.
        let adjacency = vec![vec![true, true], vec![true, false]];
        let mates = BipartiteMatcher::find_perfect_matching(adjacency.as_slice()).unwrap();
        assert_eq!(mates, vec![1, 0]);
    }

    #[test]
    fn test_long_alternating_path() {
        // Chain: l0-{r0}, l1-{r0,r1}, l2-{r1,r2}, l3-{r2,r3}
        let adjacency = vec![
            vec![true, false, false, false],
            vec![true, true, false, false],
            vec![false, true, true, false],
            vec![false, false, true, true],
        ];
        let mates = BipartiteMatcher::find_perfect_matching(adjacency.as_slice()).unwrap();
        assert!(is_valid_perfect(&adjacency, &mates));
        assert_eq!(mates, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_complete_graph() {
        let adjacency = vec![vec![true; 5]; 5];
        let mates = BipartiteMatcher::find_perfect_matching(adjacency.as_slice()).unwrap();
        assert!(is_valid_perfect(&adjacency, &mates));
    }

    #[test]
    fn test_doubly_stochastic_support() {
        let half = ratio(1, 2);
        let zero = rational(0);
        let matrix: Vec<Vec<Rational>> = vec![
            vec![half.clone(), half.clone(), zero.clone()],
            vec![zero.clone(), half.clone(), half.clone()],
            vec![half.clone(), zero, half],
        ];
        let mates = BipartiteMatcher::find_perfect_matching(matrix.as_slice()).unwrap();
        let mut columns = mates.clone();
        columns.sort_unstable();
        assert_eq!(columns, vec![0, 1, 2]);
        for (row, &col) in mates.iter().enumerate() {
            assert!(matrix[row][col] > rational(0));
        }
    }

    #[test]
    fn test_deficient_support_is_reported() {
        // Two rows compete for one column.
        let matrix = vec![
            vec![rational(1), rational(0)],
            vec![rational(1), rational(0)],
        ];
        let err = BipartiteMatcher::find_perfect_matching(matrix.as_slice()).unwrap_err();
        match err {
            LotteryError::InternalInvariantViolation { reason, snapshot } => {
                assert_eq!(reason, "support admits a matching of only 1 of 2 vertices");
                assert_eq!(snapshot, matrix);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_non_square_support_rejected() {
        let tall = vec![vec![true], vec![true]];
        let err = BipartiteMatcher::find_perfect_matching(tall.as_slice()).unwrap_err();
        assert_eq!(
            err,
            LotteryError::Validation("support row 0 has 1 entries, expected 2".into())
        );

        let ragged = vec![vec![rational(1), rational(0)], vec![rational(1)]];
        let err = BipartiteMatcher::find_perfect_matching(ragged.as_slice()).unwrap_err();
        assert!(matches!(err, LotteryError::Validation(_)));
    }

    #[test]
    fn test_maximum_matching_partial() {
        let adjacency = vec![
            vec![true, false, false],
            vec![true, false, false],
            vec![false, true, true],
        ];
        let matching = BipartiteMatcher::maximum_matching(adjacency.as_slice());
        assert_eq!(matching.len(), 2);
        assert!(!matching.is_perfect());
        assert_eq!(matching.mate(2), Some(1));
    }

    #[test]
    fn test_empty_graph() {
        let adjacency: Vec<Vec<bool>> = Vec::new();
        let matching = BipartiteMatcher::maximum_matching(adjacency.as_slice());
        assert!(matching.is_empty());
        assert!(matching.is_perfect());
    }
}
