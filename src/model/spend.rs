//! Marketing spend panel.
//!
//! Channels are kept in insertion order with their raw cost text, and
//! summed on demand. The benchmark compares actual spend with the SBA rule
//! of thumb of spending a fixed share (8% by default) of annual revenue on
//! marketing.

use crate::core::guarded_div;
use crate::parsing::parse_amount;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The SBA guideline share of annual revenue spent on marketing.
pub const DEFAULT_MARKETING_SHARE: f64 = 0.08;

/// Which presentation of the spend panel is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpendView {
    #[default]
    ChannelTable,
    SbaBenchmark,
}

impl SpendView {
    pub fn toggled(self) -> Self {
        match self {
            Self::ChannelTable => Self::SbaBenchmark,
            Self::SbaBenchmark => Self::ChannelTable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketingChannel {
    pub name: String,
    pub monthly_cost: String,
    pub monthly_adspend: String,
}

impl MarketingChannel {
    pub fn new(
        name: impl Into<String>,
        monthly_cost: impl Into<String>,
        monthly_adspend: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            monthly_cost: monthly_cost.into(),
            monthly_adspend: monthly_adspend.into(),
        }
    }

    /// Cost plus ad spend for one month.
    pub fn monthly_total(&self) -> f64 {
        parse_amount(&self.monthly_cost) + parse_amount(&self.monthly_adspend)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendTotals {
    pub total_monthly_spend: f64,
    pub total_yearly_spend: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendBenchmark {
    pub recommended_monthly_budget: f64,
    /// Negative when current spend already exceeds the recommendation
    pub additional_monthly_budget_needed: f64,
    /// Yearly spend over annual revenue, as a fraction (may exceed 1)
    pub percent_of_annual_revenue: f64,
}

/// Ordered list of marketing channels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketingSpend {
    channels: Vec<MarketingChannel>,
}

impl MarketingSpend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_channels(channels: Vec<MarketingChannel>) -> Self {
        let mut spend = Self::new();
        for channel in channels {
            spend.add_channel(channel);
        }
        spend
    }

    pub fn channels(&self) -> &[MarketingChannel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Append a channel. Channels without a name are ignored; returns
    /// whether the channel was added.
    pub fn add_channel(&mut self, channel: MarketingChannel) -> bool {
        if channel.name.trim().is_empty() {
            warn!("Ignoring marketing channel with an empty name");
            return false;
        }
        debug!(name = %channel.name, "Adding marketing channel");
        self.channels.push(channel);
        true
    }

    /// Remove the channel at `index`, or `None` if out of bounds.
    pub fn remove_channel(&mut self, index: usize) -> Option<MarketingChannel> {
        if index >= self.channels.len() {
            warn!(index, len = self.channels.len(), "Channel index out of bounds");
            return None;
        }
        Some(self.channels.remove(index))
    }

    pub fn totals(&self) -> SpendTotals {
        let total_monthly_spend: f64 = self.channels.iter().map(MarketingChannel::monthly_total).sum();
        SpendTotals {
            total_monthly_spend,
            total_yearly_spend: total_monthly_spend * 12.0,
        }
    }

    /// Compare spend with `marketing_share` of `annual_revenue`.
    pub fn benchmark(&self, annual_revenue: f64, marketing_share: f64) -> SpendBenchmark {
        benchmark_totals(&self.totals(), annual_revenue, marketing_share)
    }
}

// Pure function: benchmark from already-computed totals
pub fn benchmark_totals(
    totals: &SpendTotals,
    annual_revenue: f64,
    marketing_share: f64,
) -> SpendBenchmark {
    let recommended_monthly_budget = annual_revenue * marketing_share / 12.0;

    SpendBenchmark {
        recommended_monthly_budget,
        additional_monthly_budget_needed: recommended_monthly_budget - totals.total_monthly_spend,
        percent_of_annual_revenue: guarded_div(totals.total_yearly_spend, annual_revenue),
    }
}
