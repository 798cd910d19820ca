//! What-if revenue projection.
//!
//! Three sliders describe hypothetical improvements: reach more buyers
//! (visibility), convert more visitors into leads (lead gen), and close
//! more leads (close rate). The projection perturbs the baseline conversion
//! rates by those amounts and reports the incremental leads, accounts and
//! revenue.
//!
//! The projection never fails outward. Anything that would produce a
//! non-finite number falls back to "no change" (zero deltas, total equal to
//! current revenue).

use crate::core::{guarded_div, Ratio};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Improvement sliders, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sliders {
    pub visibility: Ratio,
    pub lead_gen: Ratio,
    pub close_rate: Ratio,
}

impl Default for Sliders {
    fn default() -> Self {
        Self {
            visibility: Ratio::clamped(0.05),
            lead_gen: Ratio::clamped(0.20),
            close_rate: Ratio::clamped(0.20),
        }
    }
}

impl Sliders {
    /// Build sliders from raw widget values, clamping each into [0, 1].
    pub fn clamped(visibility: f64, lead_gen: f64, close_rate: f64) -> Self {
        Self {
            visibility: Ratio::clamped(visibility),
            lead_gen: Ratio::clamped(lead_gen),
            close_rate: Ratio::clamped(close_rate),
        }
    }

    pub fn set(&mut self, slider: SliderKind, value: f64) {
        let value = Ratio::clamped(value);
        match slider {
            SliderKind::Visibility => self.visibility = value,
            SliderKind::LeadGen => self.lead_gen = value,
            SliderKind::CloseRate => self.close_rate = value,
        }
    }

    pub fn get(&self, slider: SliderKind) -> Ratio {
        match slider {
            SliderKind::Visibility => self.visibility,
            SliderKind::LeadGen => self.lead_gen,
            SliderKind::CloseRate => self.close_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SliderKind {
    Visibility,
    LeadGen,
    CloseRate,
}

/// Fallback rates used when the baseline has no data for a stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAssumptions {
    /// Share of buyers assumed to visit when the visitor count is unknown
    pub visitor_fallback_share: f64,
    /// Visitor -> lead conversion assumed with no visitors
    pub default_lead_conversion: f64,
    /// Lead -> customer close rate assumed with no leads
    pub default_close_rate: f64,
}

impl Default for ScenarioAssumptions {
    fn default() -> Self {
        Self {
            visitor_fallback_share: 0.3,
            default_lead_conversion: 0.1,
            default_close_rate: 0.2,
        }
    }
}

/// Current-state numbers the projection starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBaseline {
    pub visitors: f64,
    pub leads: f64,
    pub closed: f64,
    pub annual_revenue: f64,
    pub buyers: f64,
    pub avg_customer_value: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub additional_leads: f64,
    pub additional_new_accounts: f64,
    pub additional_revenue: f64,
    pub total_projected_revenue: f64,
}

impl ScenarioSnapshot {
    /// No projected change: zero deltas, total equal to current revenue.
    pub fn unchanged(annual_revenue: f64) -> Self {
        Self {
            total_projected_revenue: if annual_revenue.is_finite() {
                annual_revenue
            } else {
                0.0
            },
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("baseline field `{field}` is not a finite number")]
    NonFiniteBaseline { field: &'static str },

    #[error("projection produced a non-finite `{field}`")]
    NonFiniteOutput { field: &'static str },
}

/// Scenario panel state: the sliders, initialised once, and the fallback
/// assumptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioModel {
    pub sliders: Sliders,
    pub assumptions: ScenarioAssumptions,
}

impl ScenarioModel {
    pub fn new(sliders: Sliders, assumptions: ScenarioAssumptions) -> Self {
        Self {
            sliders,
            assumptions,
        }
    }

    /// Project with the current sliders, falling back to
    /// [`ScenarioSnapshot::unchanged`] on any failure.
    pub fn compute(&self, baseline: &ScenarioBaseline) -> ScenarioSnapshot {
        match project(&self.sliders, baseline, &self.assumptions) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Scenario projection failed, showing no change: {}", e);
                ScenarioSnapshot::unchanged(baseline.annual_revenue)
            }
        }
    }
}

/// Project incremental leads, accounts and revenue for `sliders`.
pub fn project(
    sliders: &Sliders,
    baseline: &ScenarioBaseline,
    assumptions: &ScenarioAssumptions,
) -> Result<ScenarioSnapshot, ScenarioError> {
    check_baseline(baseline)?;

    let base_visitors = if baseline.visitors > 0.0 {
        baseline.visitors
    } else {
        baseline.buyers * assumptions.visitor_fallback_share
    };
    let improved_visitors = base_visitors * (1.0 + sliders.visibility.get());
    let additional_visitors = improved_visitors - base_visitors;

    let base_lead_conversion = if base_visitors > 0.0 {
        baseline.leads / base_visitors
    } else {
        assumptions.default_lead_conversion
    };
    let improved_lead_conversion = base_lead_conversion * (1.0 + sliders.lead_gen.get());
    let additional_leads = (additional_visitors * improved_lead_conversion).max(0.0);

    let base_close_rate = if baseline.leads > 0.0 {
        baseline.closed / baseline.leads
    } else {
        assumptions.default_close_rate
    };
    let improved_close_rate = base_close_rate * (1.0 + sliders.close_rate.get());
    let additional_new_accounts = (additional_leads * improved_close_rate).max(0.0);

    let effective_customer_value = if baseline.avg_customer_value > 0.0 {
        baseline.avg_customer_value
    } else {
        guarded_div(baseline.annual_revenue, baseline.closed.max(1.0))
    };
    let additional_revenue = (additional_new_accounts * effective_customer_value).max(0.0);

    let snapshot = ScenarioSnapshot {
        additional_leads,
        additional_new_accounts,
        additional_revenue,
        total_projected_revenue: baseline
            .annual_revenue
            .max(baseline.annual_revenue + additional_revenue),
    };
    check_output(&snapshot)?;
    Ok(snapshot)
}

fn check_baseline(baseline: &ScenarioBaseline) -> Result<(), ScenarioError> {
    let fields = [
        ("visitors", baseline.visitors),
        ("leads", baseline.leads),
        ("closed", baseline.closed),
        ("annual_revenue", baseline.annual_revenue),
        ("buyers", baseline.buyers),
        ("avg_customer_value", baseline.avg_customer_value),
    ];
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(field, _)) => Err(ScenarioError::NonFiniteBaseline { field }),
        None => Ok(()),
    }
}

fn check_output(snapshot: &ScenarioSnapshot) -> Result<(), ScenarioError> {
    let fields = [
        ("additional_leads", snapshot.additional_leads),
        ("additional_new_accounts", snapshot.additional_new_accounts),
        ("additional_revenue", snapshot.additional_revenue),
        ("total_projected_revenue", snapshot.total_projected_revenue),
    ];
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(field, _)) => Err(ScenarioError::NonFiniteOutput { field }),
        None => Ok(()),
    }
}
