//! Representatives.
//!
//! An agent with demand `c` is replaced by `c` unit-demand representatives so
//! that the allocation becomes a square, doubly stochastic matrix, which the
//! decomposition step requires.

mod splitter;
mod types;

pub use splitter::RepresentativeSplitter;
pub use types::RepresentativeAllocation;
