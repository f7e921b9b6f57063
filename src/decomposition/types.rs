//! Lotteries over discrete assignments.

use crate::rational::Rational;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

/// One discrete assignment together with its probability.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotteryTerm {
    /// Probability of this assignment (strictly positive).
    pub weight: Rational,

    /// `n × m` matrix: `assignment[a][j] == 1` iff agent `a` receives item `j`.
    pub assignment: Vec<Vec<u32>>,

    /// Column matched to each representative before collapsing
    /// (`matching[r]` may be a dummy column, i.e. `>= m`).
    pub matching: Vec<usize>,
}

impl LotteryTerm {
    /// Items received by `agent` in this assignment.
    pub fn items_of(&self, agent: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignment[agent]
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(item, _)| item)
    }

    /// Agent receiving `item`, if any.
    pub fn owner_of(&self, item: usize) -> Option<usize> {
        self.assignment.iter().position(|row| row[item] > 0)
    }
}

/// A finite lottery over discrete assignments.
///
/// Weights are exact and sum to 1. The expected assignment
/// ([`expected_allocation`](Self::expected_allocation)) equals the fractional
/// allocation the lottery was decomposed from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lottery {
    pub(crate) agents: usize,
    pub(crate) items: usize,
    pub(crate) copies: usize,
    pub(crate) terms: Vec<LotteryTerm>,
}

impl Lottery {
    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the lottery has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of agents (`n`).
    pub fn agent_count(&self) -> usize {
        self.agents
    }

    /// Number of real items (`m`).
    pub fn item_count(&self) -> usize {
        self.items
    }

    /// Representatives per agent (`c`).
    pub fn copies(&self) -> usize {
        self.copies
    }

    /// Terms in extraction order.
    pub fn terms(&self) -> &[LotteryTerm] {
        &self.terms
    }

    /// Iterates over the terms.
    pub fn iter(&self) -> std::slice::Iter<'_, LotteryTerm> {
        self.terms.iter()
    }

    /// Consumes the lottery, returning its terms.
    pub fn into_terms(self) -> Vec<LotteryTerm> {
        self.terms
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> Rational {
        self.terms
            .iter()
            .fold(Rational::zero(), |acc, term| acc + &term.weight)
    }

    /// Weighted sum of the assignments (`n × m`).
    pub fn expected_allocation(&self) -> Vec<Vec<Rational>> {
        let mut expected = vec![vec![Rational::zero(); self.items]; self.agents];
        for term in &self.terms {
            for (row, assigned) in expected.iter_mut().zip(&term.assignment) {
                for (cell, &count) in row.iter_mut().zip(assigned) {
                    if count > 0 {
                        *cell += &term.weight * Rational::from_integer(BigInt::from(count));
                    }
                }
            }
        }
        expected
    }

    /// Probability that `agent` receives `item`.
    pub fn probability(&self, agent: usize, item: usize) -> Rational {
        self.terms
            .iter()
            .filter(|term| term.assignment[agent][item] > 0)
            .fold(Rational::zero(), |acc, term| acc + &term.weight)
    }

    /// Merges terms with identical assignments, summing their weights.
    ///
    /// The first occurrence keeps its position and its matching.
    pub fn merge_duplicates(self) -> Self {
        let mut merged: Vec<LotteryTerm> = Vec::with_capacity(self.terms.len());
        for term in self.terms {
            match merged
                .iter_mut()
                .find(|existing| existing.assignment == term.assignment)
            {
                Some(existing) => existing.weight += term.weight,
                None => merged.push(term),
            }
        }
        Self {
            terms: merged,
            ..self
        }
    }

    /// Draws one term with probability equal to its weight.
    ///
    /// The draw is exact: weights are scaled to integers over their common
    /// denominator and a uniform integer ticket below the total picks the
    /// term. Returns `None` only for an empty lottery.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use u_lottery::lottery::{LotteryConfig, LotteryRunner};
    /// use u_lottery::preference::UtilityProfile;
    ///
    /// let utils = UtilityProfile::from_integers(&[vec![1, 1], vec![1, 1]]).unwrap();
    /// let result = LotteryRunner::run(&utils, &LotteryConfig::default()).unwrap();
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let term = result.lottery.sample(&mut rng).unwrap();
    /// assert_eq!(term.assignment.len(), 2);
    /// ```
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&LotteryTerm> {
        self.sample_index(rng).map(|index| &self.terms[index])
    }

    /// Like [`sample`](Self::sample), returning the position of the drawn term.
    pub fn sample_index<R: Rng>(&self, rng: &mut R) -> Option<usize> {
        let denom = self
            .terms
            .iter()
            .fold(BigInt::one(), |acc, term| acc.lcm(term.weight.denom()));
        let tickets: Vec<BigInt> = self
            .terms
            .iter()
            .map(|term| term.weight.numer() * (&denom / term.weight.denom()))
            .collect();
        let total = tickets.iter().sum::<BigInt>().to_biguint()?;
        if total.is_zero() {
            return None;
        }

        let ticket = BigInt::from(uniform_below(&total, rng));
        let mut upper = BigInt::zero();
        for (index, count) in tickets.iter().enumerate() {
            upper += count;
            if ticket < upper {
                return Some(index);
            }
        }
        Some(self.terms.len() - 1)
    }
}

impl<'a> IntoIterator for &'a Lottery {
    type Item = &'a LotteryTerm;
    type IntoIter = std::slice::Iter<'a, LotteryTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Uniform integer in `[0, bound)` by rejection sampling. `bound` must be positive.
fn uniform_below<R: Rng>(bound: &BigUint, rng: &mut R) -> BigUint {
    let bits = bound.bits();
    let words = bits.div_ceil(32);
    let excess = words * 32 - bits;
    loop {
        let mut digits: Vec<u32> = (0..words).map(|_| rng.random::<u32>()).collect();
        if let Some(top) = digits.last_mut() {
            *top >>= excess;
        }
        let candidate = BigUint::new(digits);
        if &candidate < bound {
            return candidate;
        }
    }
}
