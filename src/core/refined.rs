//! Refined numeric scales for derived values
//!
//! Ratios and percentages both show up in the assessment, and mixing the two
//! scales is the easiest way to render "5000%" where "50%" was meant. Values
//! carry their scale in the type instead:
//!
//! - [`Ratio`]: a fraction in the unit interval [0.0, 1.0] (gap ratios, sliders)
//! - [`Percent`]: a value on the 0-100 scale (market revenue share)
//!
//! Both serialize as plain numbers.
//!
//! # Example
//!
//! ```
//! use gapmap::core::refined::{Percent, Ratio};
//!
//! let gap = Ratio::clamped(1.4);
//! assert_eq!(gap.get(), 1.0);
//!
//! let share: Percent = Ratio::new(0.25).unwrap().into();
//! assert_eq!(share.get(), 25.0);
//! ```

use serde::{Deserialize, Serialize};
use stillwater::refined::Predicate;

// ============================================================================
// Predicates
// ============================================================================

/// Predicate for floating-point values in the unit interval [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitInterval;

impl Predicate<f64> for UnitInterval {
    type Error = &'static str;

    fn check(value: &f64) -> Result<(), Self::Error> {
        if *value >= 0.0 && *value <= 1.0 {
            Ok(())
        } else {
            Err("value must be in range [0.0, 1.0]")
        }
    }
}

// ============================================================================
// Ratio
// ============================================================================

/// Fraction in the unit interval [0.0, 1.0].
///
/// A gap ratio of `1.0` means everything is lost at that funnel stage,
/// `0.0` means nothing is. Sliders use the same scale for "improve by".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Ratio(f64);

impl Ratio {
    pub const ZERO: Ratio = Ratio(0.0);
    pub const ONE: Ratio = Ratio(1.0);

    /// Create a ratio, validating it's in [0.0, 1.0].
    pub fn new(value: f64) -> Result<Self, &'static str> {
        UnitInterval::check(&value)?;
        Ok(Self(value))
    }

    /// Create a ratio by clamping into [0.0, 1.0]. NaN becomes `0.0`.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Get the inner value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Same ratio on the 0-100 scale.
    pub fn to_percent(self) -> Percent {
        Percent(self.0 * 100.0)
    }
}

impl TryFrom<f64> for Ratio {
    type Error = &'static str;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ratio> for f64 {
    fn from(ratio: Ratio) -> f64 {
        ratio.0
    }
}

impl std::ops::Deref for Ratio {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// ============================================================================
// Percent
// ============================================================================

/// Value on the 0-100 scale.
///
/// Not bounded above: a company's revenue can exceed the estimated market,
/// which shows up as a share over 100%.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl Percent {
    pub const ZERO: Percent = Percent(0.0);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the inner value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Same value as a fraction (50% -> 0.5). Not clamped.
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl From<Ratio> for Percent {
    fn from(ratio: Ratio) -> Self {
        ratio.to_percent()
    }
}

impl std::ops::Deref for Percent {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_new_validates_range() {
        assert!(Ratio::new(0.0).is_ok());
        assert!(Ratio::new(1.0).is_ok());
        assert!(Ratio::new(0.42).is_ok());
        assert!(Ratio::new(-0.01).is_err());
        assert!(Ratio::new(1.01).is_err());
        assert!(Ratio::new(f64::NAN).is_err());
    }

    #[test]
    fn test_ratio_clamped() {
        assert_eq!(Ratio::clamped(-3.0).get(), 0.0);
        assert_eq!(Ratio::clamped(7.0).get(), 1.0);
        assert_eq!(Ratio::clamped(0.3).get(), 0.3);
        assert_eq!(Ratio::clamped(f64::NAN).get(), 0.0);
        assert_eq!(Ratio::clamped(f64::INFINITY).get(), 1.0);
    }

    #[test]
    fn test_ratio_serializes_as_number() {
        let json = serde_json::to_string(&Ratio::clamped(0.5)).unwrap();
        assert_eq!(json, "0.5");

        let back: Ratio = serde_json::from_str("0.25").unwrap();
        assert_eq!(back.get(), 0.25);

        assert!(serde_json::from_str::<Ratio>("1.5").is_err());
    }

    #[test]
    fn test_percent_conversions() {
        let pct: Percent = Ratio::clamped(0.5).into();
        assert_eq!(pct.get(), 50.0);
        assert_eq!(Percent::new(250.0).to_fraction(), 2.5);
        assert_eq!(serde_json::to_string(&Percent::new(12.5)).unwrap(), "12.5");
    }
}
