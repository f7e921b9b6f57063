//! Splitting agents into unit-demand representatives.

use super::types::RepresentativeAllocation;
use crate::error::{LotteryError, Result};
use crate::preference::OrdinalProfile;
use crate::ps::FractionalAllocation;
use crate::rational::Rational;
use num_traits::{One, Signed, Zero};
use std::collections::VecDeque;

/// Expands each agent's fractional row into `c` rows of one unit each.
///
/// An agent's holdings are handed out in preference order: the first
/// representative fills up with the agent's most preferred items, the next
/// continues where it stopped, and so on. An item is only shared between two
/// consecutive representatives when the first one fills up in the middle of it.
pub struct RepresentativeSplitter;

impl RepresentativeSplitter {
    /// Splits `allocation` using the rankings of `profile`.
    ///
    /// Both inputs are copied; neither is modified.
    ///
    /// # Errors
    /// - [`LotteryError::Validation`] if the allocation does not have the
    ///   profile's shape.
    /// - [`LotteryError::InternalInvariantViolation`] if an agent's row does
    ///   not hold `c` full units.
    pub fn split(
        profile: &OrdinalProfile,
        allocation: &FractionalAllocation,
    ) -> Result<RepresentativeAllocation> {
        let agents = profile.agent_count();
        let copies = profile.copies();
        let columns = profile.column_count();

        if allocation.agent_count() != agents || allocation.column_count() != columns {
            return Err(LotteryError::Validation(format!(
                "allocation is {}x{}, ordinal profile expects {agents}x{columns}",
                allocation.agent_count(),
                allocation.column_count()
            )));
        }

        let mut rows = Vec::with_capacity(agents * copies);
        for agent in 0..agents {
            let mut ranking: VecDeque<usize> = profile.ranking(agent).iter().copied().collect();
            let mut remaining = allocation.row(agent).to_vec();

            for rep in 0..copies {
                let mut row = vec![Rational::zero(); columns];
                let mut demand = Rational::one();

                while demand.is_positive() {
                    let Some(&item) = ranking.front() else {
                        return Err(LotteryError::invariant(
                            format!(
                                "agent {agent} ran out of allocation filling representative {rep}"
                            ),
                            allocation.rows().to_vec(),
                        ));
                    };
                    let take = if demand < remaining[item] {
                        demand.clone()
                    } else {
                        ranking.pop_front();
                        remaining[item].clone()
                    };
                    remaining[item] -= &take;
                    demand -= &take;
                    row[item] = take;
                }

                rows.push(row);
            }
        }

        Ok(RepresentativeAllocation {
            items: profile.item_count(),
            copies,
            rows,
        })
    }
}
