//! Human-friendly number parsing.
//!
//! Form fields accept text such as `"$1.2M"`, `"50%"`, `"1,500"` or `"3b"`.
//! [`parse_amount`] turns any of these into an `f64` and never fails: text
//! that does not start with a number yields `0.0`.
//!
//! # Rules
//!
//! - Matching is case-insensitive.
//! - `$`, `,`, `%` and whitespace are stripped.
//! - The first of `k`, `m`, `b` that appears anywhere in the text selects the
//!   multiplier (1e3, 1e6, 1e9) and every occurrence of that letter is removed.
//! - The longest leading float literal is used; trailing garbage is ignored.
//! - A leading `-` is kept, so negative text parses to a negative number.
//! - Non-finite results (for example `"1e999"`) collapse to `0.0`.
//!
//! ```
//! use gapmap::parsing::parse_amount;
//!
//! assert_eq!(parse_amount("$1,000"), 1000.0);
//! assert_eq!(parse_amount("1.5k"), 1500.0);
//! assert_eq!(parse_amount("abc"), 0.0);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

const MAGNITUDE_SUFFIXES: [(char, f64); 3] = [('k', 1e3), ('m', 1e6), ('b', 1e9)];

/// Parse human-entered numeric text. Empty or malformed text yields `0.0`.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned = strip_decorations(text);
    if cleaned.is_empty() {
        return 0.0;
    }

    let (digits, multiplier) = split_magnitude(&cleaned);
    let value = leading_float(&digits).map_or(0.0, |v| v * multiplier);

    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parse a percentage field ("10", "10%") into a fraction (0.1).
pub fn parse_percent_as_fraction(text: &str) -> f64 {
    parse_amount(text) / 100.0
}

// Pure function: lower-case and drop currency, grouping and percent marks
fn strip_decorations(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

// Pure function: pick the first matching suffix and remove it from the text
fn split_magnitude(cleaned: &str) -> (String, f64) {
    MAGNITUDE_SUFFIXES
        .iter()
        .find(|(suffix, _)| cleaned.contains(*suffix))
        .map(|&(suffix, multiplier)| (cleaned.replace(suffix, ""), multiplier))
        .unwrap_or_else(|| (cleaned.to_string(), 1.0))
}

/// Float literal at the start of the text: `[+-]? digits [. digits] [e [+-]? digits]`.
/// An exponent marker without digits is not consumed, so `"2e"` reads as `2`.
static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)(e[+-]?[0-9]+)?").expect("valid float pattern")
});

// Pure function: parse the longest leading float literal, if any
fn leading_float(text: &str) -> Option<f64> {
    LEADING_FLOAT
        .find(text)
        .and_then(|literal| literal.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_garbage_yield_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("$"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
    }

    #[test]
    fn test_currency_and_grouping() {
        assert_eq!(parse_amount("$1,000"), 1000.0);
        assert_eq!(parse_amount(" $ 12,345.50 "), 12345.5);
        assert_eq!(parse_amount("50%"), 50.0);
    }

    #[test]
    fn test_magnitude_suffixes() {
        assert_eq!(parse_amount("1.5k"), 1500.0);
        assert_eq!(parse_amount("2M"), 2_000_000.0);
        assert_eq!(parse_amount("3b"), 3_000_000_000.0);
        assert_eq!(parse_amount("$1.2M"), 1_200_000.0);
        assert_eq!(parse_amount("1K"), 1000.0);
    }

    #[test]
    fn test_first_matching_suffix_wins() {
        // 'k' is checked before 'm', so this is thousands; the numeric
        // prefix after removing 'k' is "2"
        assert_eq!(parse_amount("2mk"), 2000.0);
        assert_eq!(parse_amount("1b5m"), 1_000_000.0);
    }

    #[test]
    fn test_trailing_garbage_ignored() {
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount("7.5 units"), 7.5);
        assert_eq!(parse_amount("2e"), 2.0);
    }

    #[test]
    fn test_leading_minus_is_preserved() {
        assert_eq!(parse_amount("-500"), -500.0);
        assert_eq!(parse_amount("-$1k"), -1000.0);
    }

    #[test]
    fn test_exponent_and_fraction_forms() {
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("5."), 5.0);
        assert_eq!(parse_amount("+2.5e-1"), 0.25);
        assert_eq!(parse_amount("1e+2x"), 100.0);
    }

    #[test]
    fn test_leading_float_prefix() {
        assert_eq!(leading_float("12.5abc"), Some(12.5));
        assert_eq!(leading_float("-.75"), Some(-0.75));
        assert_eq!(leading_float("e5"), None);
        assert_eq!(leading_float("+"), None);
        assert_eq!(leading_float("\u{0663}"), None);
    }

    #[test]
    fn test_non_finite_collapses_to_zero() {
        assert_eq!(parse_amount("1e999"), 0.0);
        assert_eq!(parse_amount("1e308b"), 0.0);
    }

    #[test]
    fn test_percent_as_fraction() {
        assert_eq!(parse_percent_as_fraction("10"), 0.1);
        assert_eq!(parse_percent_as_fraction("25%"), 0.25);
        assert_eq!(parse_percent_as_fraction(""), 0.0);
    }
}
