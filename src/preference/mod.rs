//! Preference construction.
//!
//! Converts a cardinal utility matrix into strict ordinal rankings, padded
//! with dummy items so that item supply matches the total demand of the
//! agents' representatives.

mod builder;
mod types;

pub use builder::PreferenceBuilder;
pub use types::{OrdinalProfile, UtilityProfile};
