//! Fair random assignment of indivisible items.
//!
//! Turns cardinal utilities into a fair fractional assignment and then into
//! an explicit lottery over discrete assignments that implements it:
//!
//! - **Preferences**: utilities become strict rankings, padded with dummy
//!   items so that supply matches demand.
//! - **Probabilistic Serial (PS)**: agents simultaneously eat their favourite
//!   remaining item, producing a fractional allocation.
//! - **Representatives**: each agent is split into unit-demand copies, which
//!   makes the allocation a square, doubly stochastic matrix.
//! - **Matching**: augmenting-path search for perfect matchings in the
//!   support of that matrix.
//! - **Decomposition**: perfect matchings are peeled off one by one
//!   (Birkhoff–von Neumann), giving weighted discrete assignments.
//! - **Lottery**: the end-to-end pipeline, plus drawing an assignment.
//!
//! All arithmetic is exact (arbitrary-precision rationals): weights sum to
//! exactly one and the lottery reproduces the fractional allocation exactly.
//!
//! # Example
//!
//! ```
//! use u_lottery::lottery::{LotteryConfig, LotteryRunner};
//! use u_lottery::preference::UtilityProfile;
//! use u_lottery::rational::rational;
//!
//! let utils = UtilityProfile::from_integers(&[
//!     vec![4, 3, 2, 1],
//!     vec![4, 2, 3, 1],
//!     vec![1, 2, 3, 4],
//! ])
//! .unwrap();
//! let result = LotteryRunner::run(&utils, &LotteryConfig::default()).unwrap();
//!
//! assert_eq!(result.lottery.total_weight(), rational(1));
//! assert_eq!(result.lottery.expected_allocation(), result.allocation.real_items());
//! ```
//!
//! # Architecture
//!
//! Like the other algorithm crates of the U-Engine ecosystem, this crate is
//! domain-agnostic and performs no I/O; presenting a lottery and sourcing
//! utilities are left to consumers.

pub mod decomposition;
pub mod error;
pub mod lottery;
pub mod matching;
pub mod preference;
pub mod ps;
pub mod rational;
pub mod representative;

pub use error::{LotteryError, Result};
