//! Display strings for derived values.
//!
//! [`currency`], [`percentage`] and [`compact`] keep the behaviour the form
//! has always shown. [`percentage`] guesses the scale from the magnitude
//! (anything above `1` is taken to already be a percentage); new call sites
//! should use [`format_ratio`], [`format_percent`] or [`format_fraction`],
//! which take the scale from the type instead.

use crate::core::{Percent, Ratio};

/// `"$1,234"`-style currency. `NaN` and exactly zero render as `"$0"`.
pub fn currency(value: f64, decimals: usize) -> String {
    if value.is_nan() || value == 0.0 {
        return "$0".to_string();
    }
    format!("${}", grouped(value, decimals))
}

/// Percentage with scale inferred from magnitude.
///
/// `0.5` and `50.0` both render as `"50%"`. A value of exactly `1.0` is
/// treated as a ratio and renders as `"100%"`.
pub fn percentage(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "0%".to_string();
    }
    if value > 1.0 {
        format!("{:.*}%", decimals, value)
    } else {
        format!("{:.*}%", decimals, value * 100.0)
    }
}

/// Compact magnitude: `1.2M`, `350K`, `3B`. `NaN` and zero render as `"0"`.
pub fn compact(value: f64, decimals: usize) -> String {
    if value.is_nan() || value == 0.0 {
        return "0".to_string();
    }

    const SCALES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    SCALES
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(threshold, suffix)| format!("{:.*}{}", decimals, value / threshold, suffix))
        .unwrap_or_else(|| format!("{:.*}", decimals, value))
}

/// Render a unit-interval ratio as a percentage (`0.9` -> `"90%"`).
pub fn format_ratio(ratio: Ratio, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio.get() * 100.0)
}

/// Render a 0-100 scale value (`12.5` -> `"12.5%"` with one decimal).
pub fn format_percent(percent: Percent, decimals: usize) -> String {
    if percent.get().is_nan() {
        return "0%".to_string();
    }
    format!("{:.*}%", decimals, percent.get())
}

/// Render an unbounded fraction as a percentage (`1.25` -> `"125%"`).
pub fn format_fraction(fraction: f64, decimals: usize) -> String {
    if !fraction.is_finite() {
        return "0%".to_string();
    }
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Fixed-decimal rendering with `,` thousands separators.
fn grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(currency(0.0, 0), "$0");
        assert_eq!(currency(f64::NAN, 0), "$0");
        assert_eq!(currency(1000.0, 0), "$1,000");
        assert_eq!(currency(100_000_000.0, 0), "$100,000,000");
        assert_eq!(currency(999.0, 0), "$999");
        assert_eq!(currency(1234.5, 2), "$1,234.50");
        assert_eq!(currency(-1500.0, 0), "$-1,500");
    }

    #[test]
    fn test_currency_rounding_to_zero_drops_sign() {
        assert_eq!(currency(-0.2, 0), "$0");
    }

    #[test]
    fn test_percentage_dual_scale() {
        assert_eq!(percentage(0.5, 0), "50%");
        assert_eq!(percentage(50.0, 0), "50%");
        assert_eq!(percentage(f64::NAN, 0), "0%");
        assert_eq!(percentage(1.0, 0), "100%");
        assert_eq!(percentage(0.125, 1), "12.5%");
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact(0.0, 0), "0");
        assert_eq!(compact(f64::NAN, 0), "0");
        assert_eq!(compact(950.0, 0), "950");
        assert_eq!(compact(1500.0, 1), "1.5K");
        assert_eq!(compact(2_000_000.0, 0), "2M");
        assert_eq!(compact(3_000_000_000.0, 0), "3B");
    }

    #[test]
    fn test_explicit_scales() {
        assert_eq!(format_ratio(Ratio::clamped(0.9), 0), "90%");
        assert_eq!(format_ratio(Ratio::ONE, 0), "100%");
        assert_eq!(format_percent(Percent::new(1.0), 0), "1%");
        assert_eq!(format_percent(Percent::new(12.5), 1), "12.5%");
        assert_eq!(format_fraction(1.25, 0), "125%");
        assert_eq!(format_fraction(f64::INFINITY, 0), "0%");
    }

    #[test]
    fn test_grouping_boundaries() {
        assert_eq!(grouped(100.0, 0), "100");
        assert_eq!(grouped(1000.0, 0), "1,000");
        assert_eq!(grouped(999_999.0, 0), "999,999");
        assert_eq!(grouped(1_000_000.0, 0), "1,000,000");
    }
}
