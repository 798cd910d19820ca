use crate::parsing::{parse_amount, parse_percent_as_fraction};
use anyhow::Result;
use serde::Serialize;

/// One text value and the numbers it becomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedValue {
    pub text: String,
    pub amount: f64,
    pub as_fraction: f64,
}

impl ParsedValue {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            amount: parse_amount(text),
            as_fraction: parse_percent_as_fraction(text),
        }
    }
}

pub fn parse_values(values: &[String], json: bool) -> Result<()> {
    println!("{}", render_parsed(values, json)?);
    Ok(())
}

fn render_parsed(values: &[String], json: bool) -> Result<String> {
    let parsed: Vec<ParsedValue> = values
        .iter()
        .map(|text| ParsedValue::from_text(text))
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&parsed)?);
    }

    Ok(parsed
        .iter()
        .map(|p| {
            format!(
                "{:>16}  ->  {}  (as percent: {})",
                format!("{:?}", p.text),
                p.amount,
                p.as_fraction
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_value() {
        let parsed = ParsedValue::from_text("$1.5k");
        assert_eq!(parsed.amount, 1500.0);
        assert_eq!(parsed.as_fraction, 15.0);

        let parsed = ParsedValue::from_text("12%");
        assert_eq!(parsed.amount, 12.0);
        assert_eq!(parsed.as_fraction, 0.12);
    }

    #[test]
    fn test_render_json() {
        let rendered = render_parsed(&["2M".to_string(), "n/a".to_string()], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value[0]["text"], "2M");
        assert_eq!(value[0]["amount"], 2_000_000.0);
        assert_eq!(value[1]["amount"], 0.0);
    }

    #[test]
    fn test_render_plain() {
        let rendered = render_parsed(&["1.5k".to_string()], false).unwrap();
        assert!(rendered.contains("->  1500"));
        assert!(rendered.contains("(as percent: 15)"));
    }

    #[test]
    fn test_garbage_is_zero() {
        let parsed = ParsedValue::from_text("n/a");
        assert_eq!(parsed.amount, 0.0);
        assert_eq!(parsed.as_fraction, 0.0);
    }
}
