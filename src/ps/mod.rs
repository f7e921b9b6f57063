//! Probabilistic Serial (PS) mechanism.
//!
//! Agents simultaneously "eat" their most preferred remaining item at equal
//! speed. The amounts eaten form a fractional allocation that is envy-free
//! and ordinally efficient.
//!
//! # References
//!
//! - Bogomolnaia, A. & Moulin, H. (2001). "A New Solution to the Random
//!   Assignment Problem", *Journal of Economic Theory* 100(2), 295-328.
//! - Kojima, F. (2009). "Random assignment of multiple indivisible objects",
//!   *Mathematical Social Sciences* 57(1), 134-142.

mod engine;
mod types;

pub use engine::{PsEngine, PsResult};
pub use types::FractionalAllocation;
