//! Bipartite perfect matching.
//!
//! Augmenting-path search over the support of a square matrix. Used by the
//! decomposition to extract one permutation per round.

mod bipartite;
mod types;

pub use bipartite::BipartiteMatcher;
pub use types::{Matching, SupportGraph};
