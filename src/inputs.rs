//! Raw-input documents.
//!
//! An [`AssessmentInputs`] holds exactly what a user typed: every field is
//! text, parsed only when a snapshot is computed. Documents can be written
//! as TOML, JSON or YAML; the file extension picks the decoder.
//!
//! ```toml
//! [market]
//! audience_size = "1M"
//! buyer_percent = "10"
//! avg_customer_value = "$1k"
//!
//! [funnel]
//! mode = "lead-gen"
//!
//! [funnel.lead_gen]
//! visitors = "10,000"
//! leads = "1,000"
//! closed = "100"
//!
//! [[channels]]
//! name = "Ads"
//! monthly_cost = "$500"
//! monthly_adspend = "$1,500"
//! ```

use crate::errors::{Error, Result};
use crate::model::company::CompanyInputs;
use crate::model::funnel::FunnelInputs;
use crate::model::market::MarketInputs;
use crate::model::scenario::Sliders;
use crate::model::spend::{MarketingChannel, SpendView};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
    Yaml,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}

/// Slider positions as written in a document; missing sliders keep the
/// session's current value and out-of-range values are clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderInputs {
    pub visibility: Option<f64>,
    pub lead_gen: Option<f64>,
    pub close_rate: Option<f64>,
}

impl SliderInputs {
    pub fn resolve(&self, current: Sliders) -> Sliders {
        Sliders::clamped(
            self.visibility.unwrap_or(current.visibility.get()),
            self.lead_gen.unwrap_or(current.lead_gen.get()),
            self.close_rate.unwrap_or(current.close_rate.get()),
        )
    }
}

impl From<Sliders> for SliderInputs {
    fn from(sliders: Sliders) -> Self {
        Self {
            visibility: Some(sliders.visibility.get()),
            lead_gen: Some(sliders.lead_gen.get()),
            close_rate: Some(sliders.close_rate.get()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentInputs {
    pub spend_view: SpendView,
    pub market: MarketInputs,
    pub company: CompanyInputs,
    pub funnel: FunnelInputs,
    pub channels: Vec<MarketingChannel>,
    pub sliders: Option<SliderInputs>,
    /// Panel notes from the rich-text editor, kept as opaque HTML
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: BTreeMap<String, String>,
}

impl AssessmentInputs {
    pub fn from_document(contents: &str, format: InputFormat) -> Result<Self> {
        let inputs = match format {
            InputFormat::Toml => toml::from_str(contents)?,
            InputFormat::Json => serde_json::from_str(contents)?,
            InputFormat::Yaml => serde_yaml::from_str(contents)?,
        };
        Ok(inputs)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let format = InputFormat::from_path(path)?;
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::input_file(e.to_string(), path))?;
        Self::from_document(&contents, format).map_err(|e| Error::input_file(e.to_string(), path))
    }

    /// Render as TOML, the format `gapmap init` writes.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::funnel::FunnelMode;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(&PathBuf::from("a.toml")).unwrap(), InputFormat::Toml);
        assert_eq!(InputFormat::from_path(&PathBuf::from("a.JSON")).unwrap(), InputFormat::Json);
        assert_eq!(InputFormat::from_path(&PathBuf::from("a.yml")).unwrap(), InputFormat::Yaml);
        assert!(matches!(
            InputFormat::from_path(&PathBuf::from("a.csv")),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_toml_document() {
        let inputs = AssessmentInputs::from_document(
            indoc! {r#"
                spend_view = "sba-benchmark"

                [market]
                audience_size = "1M"
                buyer_percent = "10"

                [funnel]
                mode = "retail"

                [funnel.retail]
                visitors = "2,000"

                [[channels]]
                name = "Ads"
                monthly_cost = "$500"

                [sliders]
                visibility = 0.5

                [notes]
                market = "<p>check census data</p>"
            "#},
            InputFormat::Toml,
        )
        .unwrap();

        assert_eq!(inputs.market.audience_size, "1M");
        assert_eq!(inputs.market.avg_customer_value, "");
        assert_eq!(inputs.funnel.mode, FunnelMode::Retail);
        assert_eq!(inputs.funnel.retail.visitors, "2,000");
        assert_eq!(inputs.channels, vec![MarketingChannel::new("Ads", "$500", "")]);
        assert_eq!(inputs.spend_view, SpendView::SbaBenchmark);
        assert_eq!(inputs.sliders.unwrap().visibility, Some(0.5));
        assert_eq!(inputs.notes["market"], "<p>check census data</p>");
    }

    #[test]
    fn test_json_and_yaml_documents_agree() {
        let json = AssessmentInputs::from_document(
            r#"{"company": {"annual_revenue": "$250k"}, "funnel": {"lead_gen": {"leads": "40"}}}"#,
            InputFormat::Json,
        )
        .unwrap();
        let yaml = AssessmentInputs::from_document(
            indoc! {r#"
                company:
                  annual_revenue: "$250k"
                funnel:
                  lead_gen:
                    leads: "40"
            "#},
            InputFormat::Yaml,
        )
        .unwrap();
        assert_eq!(json, yaml);
        assert_eq!(json.funnel.mode, FunnelMode::LeadGen);
    }

    #[test]
    fn test_slider_inputs_resolve_and_clamp() {
        let partial = SliderInputs {
            visibility: Some(4.0),
            lead_gen: None,
            close_rate: Some(0.5),
        };
        let sliders = partial.resolve(Sliders::default());
        assert_eq!(sliders.visibility.get(), 1.0);
        assert_eq!(sliders.lead_gen.get(), 0.20);
        assert_eq!(sliders.close_rate.get(), 0.5);
    }

    #[test]
    fn test_toml_output_reloads() {
        let mut inputs = AssessmentInputs::default();
        inputs.market.audience_size = "50k".into();
        inputs.channels.push(MarketingChannel::new("Email", "$99", ""));

        let text = inputs.to_toml().unwrap();
        let back = AssessmentInputs::from_document(&text, InputFormat::Toml).unwrap();
        assert_eq!(back, inputs);
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(AssessmentInputs::from_document("[market", InputFormat::Toml).is_err());
        assert!(AssessmentInputs::from_document("{", InputFormat::Json).is_err());
    }
}
