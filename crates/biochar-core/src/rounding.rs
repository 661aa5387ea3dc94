//! Decimal rounding for reported quantities.
//!
//! Values are rounded half-to-even on their exact binary value: `0.125`
//! is a true tie and becomes `0.12`, while `2.675` is stored just below the
//! midpoint and becomes `2.67`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round `value` to `dp` decimal places, ties to even.
///
/// Values outside the decimal range (non-finite or beyond ~7.9e28) are
/// returned unchanged.
pub fn round_half_even(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
