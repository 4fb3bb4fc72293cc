// In crates/projections/src/projection/mod.rs

//! The six projections from a report to something visible.
//!
//! Each one is a pure function of the report (and, where it shows instants,
//! the view state). Drawing and table ownership live in [`crate::view`].

use rust_decimal::{Decimal, RoundingStrategy};

pub mod distribution;
pub mod drawdown;
pub mod equity;
pub mod orders;
pub mod statistics;
pub mod trades;

/// A decimal exactly as exported, without trailing zeros.
pub(crate) fn as_is(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Exactly two decimal places, halves rounded away from zero.
pub(crate) fn two_places(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// A 0..=1 fraction shown as a percentage with two decimals.
pub(crate) fn fraction_as_percent(fraction: Decimal) -> String {
    format!("{}%", two_places(fraction * Decimal::ONE_HUNDRED))
}
