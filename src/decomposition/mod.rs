//! Birkhoff–von Neumann decomposition.
//!
//! Expresses a doubly stochastic matrix as a convex combination of
//! permutation matrices by repeatedly peeling off perfect matchings. Applied
//! to a representative allocation, this yields an explicit lottery over
//! discrete assignments whose expectation is the fractional allocation.
//!
//! # References
//!
//! - Birkhoff, G. (1946). "Three observations on linear algebra",
//!   *Univ. Nac. Tucumán Rev. Ser. A* 5, 147-151.
//! - Budish, E., Che, Y.-K., Kojima, F. & Milgrom, P. (2013). "Designing
//!   Random Allocation Mechanisms: Theory and Applications", *American
//!   Economic Review* 103(2), 585-623.

mod config;
mod decomposer;
mod types;

pub use config::DecompositionConfig;
pub use decomposer::Decomposer;
pub use types::{Lottery, LotteryTerm};
