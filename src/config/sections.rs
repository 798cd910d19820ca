//! Configuration sections for the assessment
//!
//! - `[benchmark]`: marketing share of revenue used by the spend benchmark
//! - `[scenario]`: default slider positions and fallback conversion rates
//! - `[output]`: default report format and decimal places

use crate::model::scenario::{ScenarioAssumptions, Sliders};
use crate::model::spend::DEFAULT_MARKETING_SHARE;
use serde::{Deserialize, Serialize};

/// Marketing spend benchmark configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Recommended marketing spend as a fraction of annual revenue (0.0-1.0]
    #[serde(default = "default_marketing_share")]
    pub marketing_share: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            marketing_share: default_marketing_share(),
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.marketing_share > 0.0 && self.marketing_share <= 1.0 {
            Ok(())
        } else {
            Err(format!(
                "benchmark.marketing_share must be in (0.0, 1.0], got {}",
                self.marketing_share
            ))
        }
    }
}

pub fn default_marketing_share() -> f64 {
    DEFAULT_MARKETING_SHARE
}

/// Scenario defaults and fallback heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Initial visibility slider (0.0-1.0)
    #[serde(default = "default_visibility")]
    pub visibility: f64,

    /// Initial lead generation slider (0.0-1.0)
    #[serde(default = "default_lead_gen")]
    pub lead_gen: f64,

    /// Initial close rate slider (0.0-1.0)
    #[serde(default = "default_close_rate_slider")]
    pub close_rate: f64,

    /// Share of buyers assumed to visit when no visitor count is entered
    #[serde(default = "default_visitor_fallback_share")]
    pub visitor_fallback_share: f64,

    /// Visitor to lead conversion assumed when there are no visitors
    #[serde(default = "default_lead_conversion")]
    pub default_lead_conversion: f64,

    /// Lead to customer close rate assumed when there are no leads
    #[serde(default = "default_close_rate")]
    pub default_close_rate: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            visibility: default_visibility(),
            lead_gen: default_lead_gen(),
            close_rate: default_close_rate_slider(),
            visitor_fallback_share: default_visitor_fallback_share(),
            default_lead_conversion: default_lead_conversion(),
            default_close_rate: default_close_rate(),
        }
    }
}

impl ScenarioConfig {
    // Pure function: Check if a value is in the unit interval
    pub fn is_unit_interval(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }

    // Pure function: Validate a single value with name
    pub fn validate_unit(value: f64, name: &str) -> Result<(), String> {
        if Self::is_unit_interval(value) {
            Ok(())
        } else {
            Err(format!("scenario.{} must be between 0.0 and 1.0, got {}", name, value))
        }
    }

    // Pure function: Collect all validations
    pub fn collect_validations(&self) -> Vec<Result<(), String>> {
        vec![
            Self::validate_unit(self.visibility, "visibility"),
            Self::validate_unit(self.lead_gen, "lead_gen"),
            Self::validate_unit(self.close_rate, "close_rate"),
            Self::validate_unit(self.visitor_fallback_share, "visitor_fallback_share"),
            Self::validate_unit(self.default_lead_conversion, "default_lead_conversion"),
            Self::validate_unit(self.default_close_rate, "default_close_rate"),
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        for validation in self.collect_validations() {
            validation?;
        }
        Ok(())
    }

    /// Slider positions a new session starts from.
    pub fn initial_sliders(&self) -> Sliders {
        Sliders::clamped(self.visibility, self.lead_gen, self.close_rate)
    }

    pub fn assumptions(&self) -> ScenarioAssumptions {
        ScenarioAssumptions {
            visitor_fallback_share: self.visitor_fallback_share,
            default_lead_conversion: self.default_lead_conversion,
            default_close_rate: self.default_close_rate,
        }
    }
}

pub fn default_visibility() -> f64 {
    0.05
}
pub fn default_lead_gen() -> f64 {
    0.20
}
pub fn default_close_rate_slider() -> f64 {
    0.20
}
pub fn default_visitor_fallback_share() -> f64 {
    0.3
}
pub fn default_lead_conversion() -> f64 {
    0.1
}
pub fn default_close_rate() -> f64 {
    0.2
}

/// Output defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// terminal | markdown | json
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Decimal places for currency and percentages
    #[serde(default)]
    pub decimals: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            decimals: 0,
        }
    }
}

impl OutputConfig {
    pub const MAX_DECIMALS: usize = 6;

    pub fn validate(&self) -> Result<(), String> {
        if !matches!(
            self.default_format.as_str(),
            "terminal" | "markdown" | "json"
        ) {
            return Err(format!(
                "output.default_format must be one of terminal, markdown, json; got '{}'",
                self.default_format
            ));
        }
        if self.decimals > Self::MAX_DECIMALS {
            return Err(format!(
                "output.decimals must be at most {}, got {}",
                Self::MAX_DECIMALS,
                self.decimals
            ));
        }
        Ok(())
    }
}

pub fn default_format() -> String {
    "terminal".to_string()
}
