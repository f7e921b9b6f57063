//! Random assignment pipeline.
//!
//! Chains preference construction, Probabilistic Serial, representative
//! splitting, and Birkhoff–von Neumann decomposition into a single call that
//! turns a utility matrix into an explicit lottery over discrete assignments.
//! Also draws an assignment from that lottery.

mod config;
mod runner;

pub use config::LotteryConfig;
pub use runner::{Draw, LotteryResult, LotteryRunner};
