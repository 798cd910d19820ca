//! Funnel gap ratios.
//!
//! A business runs one of two funnels:
//!
//! - **Lead generation**: buyers -> visitors -> leads -> closed
//! - **Retail**: buyers -> visitors -> closed (no lead stage)
//!
//! Each stage loses some volume. The gap at a stage is the fraction of the
//! upstream volume that did not make it downstream, always in [0, 1]. Both
//! funnels keep their raw inputs so switching modes never loses data.

use crate::core::{guarded_div, Ratio};
use crate::parsing::parse_amount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunnelMode {
    #[default]
    LeadGen,
    Retail,
}

impl FunnelMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::LeadGen => Self::Retail,
            Self::Retail => Self::LeadGen,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadGenFunnel {
    pub visitors: String,
    pub leads: String,
    pub closed: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetailFunnel {
    pub visitors: String,
    pub closed: String,
}

/// Both funnels' raw text plus which one is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelInputs {
    pub mode: FunnelMode,
    pub lead_gen: LeadGenFunnel,
    pub retail: RetailFunnel,
}

/// Parsed stage counts for the active funnel.
///
/// Retail has no lead stage; every store visit counts as a lead, so `leads`
/// mirrors `visitors` there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FunnelCounts {
    pub visitors: f64,
    pub leads: f64,
    pub closed: f64,
}

impl FunnelInputs {
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn active_counts(&self) -> FunnelCounts {
        match self.mode {
            FunnelMode::LeadGen => FunnelCounts {
                visitors: parse_amount(&self.lead_gen.visitors),
                leads: parse_amount(&self.lead_gen.leads),
                closed: parse_amount(&self.lead_gen.closed),
            },
            FunnelMode::Retail => {
                let visitors = parse_amount(&self.retail.visitors);
                FunnelCounts {
                    visitors,
                    leads: visitors,
                    closed: parse_amount(&self.retail.closed),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum GapSnapshot {
    LeadGen {
        visibility_reach_gap: Ratio,
        lead_gen_gap: Ratio,
        close_rate_gap: Ratio,
    },
    Retail {
        visibility_reach_gap: Ratio,
        close_rate_gap: Ratio,
    },
}

impl GapSnapshot {
    /// Recompute every gap for the active mode from scratch.
    pub fn compute(inputs: &FunnelInputs, buyers: f64) -> Self {
        let counts = inputs.active_counts();
        match inputs.mode {
            FunnelMode::LeadGen => Self::LeadGen {
                visibility_reach_gap: stage_gap(buyers, counts.visitors),
                lead_gen_gap: stage_gap(counts.visitors, counts.leads),
                close_rate_gap: stage_gap(counts.leads, counts.closed),
            },
            FunnelMode::Retail => Self::Retail {
                visibility_reach_gap: stage_gap(buyers, counts.visitors),
                close_rate_gap: stage_gap(counts.visitors, counts.closed),
            },
        }
    }

    pub fn mode(&self) -> FunnelMode {
        match self {
            Self::LeadGen { .. } => FunnelMode::LeadGen,
            Self::Retail { .. } => FunnelMode::Retail,
        }
    }

    pub fn visibility_reach_gap(&self) -> Ratio {
        match *self {
            Self::LeadGen {
                visibility_reach_gap,
                ..
            }
            | Self::Retail {
                visibility_reach_gap,
                ..
            } => visibility_reach_gap,
        }
    }

    /// `None` in retail mode, which has no lead stage.
    pub fn lead_gen_gap(&self) -> Option<Ratio> {
        match *self {
            Self::LeadGen { lead_gen_gap, .. } => Some(lead_gen_gap),
            Self::Retail { .. } => None,
        }
    }

    pub fn close_rate_gap(&self) -> Ratio {
        match *self {
            Self::LeadGen { close_rate_gap, .. } | Self::Retail { close_rate_gap, .. } => {
                close_rate_gap
            }
        }
    }
}

/// Fraction of `upstream` lost before `downstream`, clamped to [0, 1].
///
/// Zero (or negative) upstream volume has nothing to lose, so the gap is `0`.
pub fn stage_gap(upstream: f64, downstream: f64) -> Ratio {
    if upstream > 0.0 {
        Ratio::clamped(guarded_div(upstream - downstream, upstream))
    } else {
        Ratio::ZERO
    }
}
