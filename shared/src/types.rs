//! Common numeric helpers used across the engine

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a display value to 2 decimal places, midpoint away from zero.
///
/// Rounds the exact binary value of the `f64`: `0.125` is a true midpoint
/// and becomes `0.13`, while `3.545` is stored just below its midpoint and
/// becomes `3.54`, the same as `toFixed(2)` in the browser. Non-finite
/// values are returned unchanged.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Clamp that tolerates NaN by passing it through
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return value;
    }
    value.max(min).min(max)
}

/// Treat an optional number as present only when it is a positive finite value
pub fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
