use serde::{Deserialize, Serialize};

use super::sections::{BenchmarkConfig, OutputConfig, ScenarioConfig};

/// Root configuration structure for gapmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GapmapConfig {
    /// Marketing spend benchmark
    #[serde(default)]
    pub benchmark: Option<BenchmarkConfig>,

    /// Scenario slider defaults and fallback rates
    #[serde(default)]
    pub scenario: Option<ScenarioConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl GapmapConfig {
    pub fn benchmark(&self) -> BenchmarkConfig {
        self.benchmark.clone().unwrap_or_default()
    }

    pub fn scenario(&self) -> ScenarioConfig {
        self.scenario.clone().unwrap_or_default()
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    pub fn marketing_share(&self) -> f64 {
        self.benchmark
            .as_ref()
            .map(|b| b.marketing_share)
            .unwrap_or_else(super::sections::default_marketing_share)
    }
}
