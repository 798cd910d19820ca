pub mod refined;

pub use refined::{Percent, Ratio};

/// Divide, substituting `0.0` when the divisor is not strictly positive.
///
/// Every formula with a potentially-zero divisor goes through here, so
/// division by zero never produces infinity or NaN downstream.
pub fn guarded_div(numerator: f64, divisor: f64) -> f64 {
    if divisor > 0.0 {
        numerator / divisor
    } else {
        0.0
    }
}

/// Replace infinity and NaN with `0.0`. Products of very large inputs pass
/// through here so snapshots always serialize as numbers.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
