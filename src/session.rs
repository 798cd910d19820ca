//! The assessment session.
//!
//! One session exists per assessment. It owns every raw text field, the
//! funnel mode, the channel list and the scenario sliders. Input events
//! arrive as [`Action`]s; [`AssessmentSession::snapshot`] recomputes every
//! panel from scratch, so the result depends only on the current inputs.
//!
//! ```
//! use gapmap::session::{Action, AssessmentSession, InputField};
//!
//! let mut session = AssessmentSession::new();
//! session.apply(Action::SetInput(InputField::AudienceSize, "1M".into()));
//! session.apply(Action::SetInput(InputField::BuyerPercent, "10".into()));
//! session.apply(Action::SetInput(InputField::AvgCustomerValue, "$1k".into()));
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.market.calculated_buyers, 100_000.0);
//! assert_eq!(snapshot.market.total_market_revenue, 100_000_000.0);
//! ```

use crate::config::GapmapConfig;
use crate::inputs::AssessmentInputs;
use crate::model::company::{CompanyInputs, CompanySnapshot};
use crate::model::funnel::{FunnelInputs, FunnelMode, GapSnapshot};
use crate::model::market::{MarketInputs, MarketSnapshot};
use crate::model::scenario::{ScenarioBaseline, ScenarioModel, ScenarioSnapshot, SliderKind, Sliders};
use crate::model::spend::{
    benchmark_totals, MarketingChannel, MarketingSpend, SpendBenchmark, SpendTotals, SpendView,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, debug_span};

/// Every free-text field on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    AudienceSize,
    BuyerPercent,
    AvgCustomerValue,
    AnnualRevenue,
    PercentNewCustomers,
    LeadGenVisitors,
    LeadGenLeads,
    LeadGenClosed,
    RetailVisitors,
    RetailClosed,
}

impl InputField {
    pub const ALL: [InputField; 10] = [
        Self::AudienceSize,
        Self::BuyerPercent,
        Self::AvgCustomerValue,
        Self::AnnualRevenue,
        Self::PercentNewCustomers,
        Self::LeadGenVisitors,
        Self::LeadGenLeads,
        Self::LeadGenClosed,
        Self::RetailVisitors,
        Self::RetailClosed,
    ];
}

/// A discrete input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    SetInput(InputField, String),
    AddChannel(MarketingChannel),
    RemoveChannel(usize),
    ToggleMode,
    ToggleSpendView,
    ToggleSliders,
    SetSlider(SliderKind, f64),
    /// Replace a panel's note with HTML from the rich-text editor
    SetNote(String, String),
}

/// Spend totals together with the revenue benchmark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendSnapshot {
    pub view: SpendView,
    pub channel_count: usize,
    #[serde(flatten)]
    pub totals: SpendTotals,
    #[serde(flatten)]
    pub benchmark: SpendBenchmark,
}

/// Every derived value, recomputed in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub market: MarketSnapshot,
    pub company: CompanySnapshot,
    pub gaps: GapSnapshot,
    pub spend: SpendSnapshot,
    pub sliders: Sliders,
    pub sliders_visible: bool,
    pub scenario: ScenarioSnapshot,
}

impl AssessmentSnapshot {
    pub fn mode(&self) -> FunnelMode {
        self.gaps.mode()
    }
}

/// Raw inputs plus every derived value, for tools that consume the whole
/// assessment at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub version: String,
    pub inputs: AssessmentInputs,
    pub snapshot: AssessmentSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentSession {
    market: MarketInputs,
    company: CompanyInputs,
    funnel: FunnelInputs,
    spend: MarketingSpend,
    spend_view: SpendView,
    scenario: ScenarioModel,
    sliders_visible: bool,
    marketing_share: f64,
    notes: BTreeMap<String, String>,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentSession {
    /// Empty session with default sliders and the 8% benchmark.
    pub fn new() -> Self {
        Self::with_config(&GapmapConfig::default())
    }

    /// Empty session whose sliders, fallback rates and benchmark come from
    /// `config`. Sliders are initialised here and nowhere else.
    pub fn with_config(config: &GapmapConfig) -> Self {
        let scenario = config.scenario();
        Self {
            market: MarketInputs::default(),
            company: CompanyInputs::default(),
            funnel: FunnelInputs::default(),
            spend: MarketingSpend::new(),
            spend_view: SpendView::default(),
            scenario: ScenarioModel::new(scenario.initial_sliders(), scenario.assumptions()),
            sliders_visible: true,
            marketing_share: config.marketing_share(),
            notes: BTreeMap::new(),
        }
    }

    /// Seed a session from an inputs document.
    pub fn from_inputs(inputs: &AssessmentInputs, config: &GapmapConfig) -> Self {
        let mut session = Self::with_config(config);
        session.market = inputs.market.clone();
        session.company = inputs.company.clone();
        session.funnel = inputs.funnel.clone();
        session.spend = MarketingSpend::from_channels(inputs.channels.clone());
        session.spend_view = inputs.spend_view;
        session.notes = inputs.notes.clone();
        if let Some(sliders) = &inputs.sliders {
            session.scenario.sliders = sliders.resolve(session.scenario.sliders);
        }
        session
    }

    /// Apply one input event.
    pub fn apply(&mut self, action: Action) {
        debug!(?action, "Applying action");
        match action {
            Action::SetInput(field, text) => self.set_input(field, text),
            Action::AddChannel(channel) => {
                self.spend.add_channel(channel);
            }
            Action::RemoveChannel(index) => {
                self.spend.remove_channel(index);
            }
            Action::ToggleMode => self.funnel.toggle_mode(),
            Action::ToggleSpendView => self.spend_view = self.spend_view.toggled(),
            Action::ToggleSliders => self.sliders_visible = !self.sliders_visible,
            Action::SetSlider(slider, value) => self.scenario.sliders.set(slider, value),
            Action::SetNote(panel, html) => {
                self.notes.insert(panel, html);
            }
        }
    }

    pub fn set_input(&mut self, field: InputField, text: impl Into<String>) {
        *self.field_mut(field) = text.into();
    }

    pub fn input(&self, field: InputField) -> &str {
        match field {
            InputField::AudienceSize => &self.market.audience_size,
            InputField::BuyerPercent => &self.market.buyer_percent,
            InputField::AvgCustomerValue => &self.market.avg_customer_value,
            InputField::AnnualRevenue => &self.company.annual_revenue,
            InputField::PercentNewCustomers => &self.company.percent_new_customers,
            InputField::LeadGenVisitors => &self.funnel.lead_gen.visitors,
            InputField::LeadGenLeads => &self.funnel.lead_gen.leads,
            InputField::LeadGenClosed => &self.funnel.lead_gen.closed,
            InputField::RetailVisitors => &self.funnel.retail.visitors,
            InputField::RetailClosed => &self.funnel.retail.closed,
        }
    }

    fn field_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::AudienceSize => &mut self.market.audience_size,
            InputField::BuyerPercent => &mut self.market.buyer_percent,
            InputField::AvgCustomerValue => &mut self.market.avg_customer_value,
            InputField::AnnualRevenue => &mut self.company.annual_revenue,
            InputField::PercentNewCustomers => &mut self.company.percent_new_customers,
            InputField::LeadGenVisitors => &mut self.funnel.lead_gen.visitors,
            InputField::LeadGenLeads => &mut self.funnel.lead_gen.leads,
            InputField::LeadGenClosed => &mut self.funnel.lead_gen.closed,
            InputField::RetailVisitors => &mut self.funnel.retail.visitors,
            InputField::RetailClosed => &mut self.funnel.retail.closed,
        }
    }

    pub fn mode(&self) -> FunnelMode {
        self.funnel.mode
    }

    pub fn spend_view(&self) -> SpendView {
        self.spend_view
    }

    pub fn sliders(&self) -> Sliders {
        self.scenario.sliders
    }

    pub fn channels(&self) -> &[MarketingChannel] {
        self.spend.channels()
    }

    /// Raw inputs as a serializable document.
    pub fn to_inputs(&self) -> AssessmentInputs {
        AssessmentInputs {
            market: self.market.clone(),
            company: self.company.clone(),
            funnel: self.funnel.clone(),
            channels: self.spend.channels().to_vec(),
            spend_view: self.spend_view,
            sliders: Some(self.scenario.sliders.into()),
            notes: self.notes.clone(),
        }
    }

    pub fn diagnostic_report(&self) -> DiagnosticReport {
        DiagnosticReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            inputs: self.to_inputs(),
            snapshot: self.snapshot(),
        }
    }

    /// Recompute every panel.
    pub fn snapshot(&self) -> AssessmentSnapshot {
        let _span = debug_span!("snapshot", mode = ?self.funnel.mode).entered();

        let market = MarketSnapshot::compute(&self.market);
        let company = CompanySnapshot::compute(&self.company, &market);
        let gaps = GapSnapshot::compute(&self.funnel, market.calculated_buyers);

        let totals = self.spend.totals();
        let spend = SpendSnapshot {
            view: self.spend_view,
            channel_count: self.spend.len(),
            totals,
            benchmark: benchmark_totals(&totals, company.annual_revenue, self.marketing_share),
        };

        let counts = self.funnel.active_counts();
        let baseline = ScenarioBaseline {
            visitors: counts.visitors,
            leads: counts.leads,
            closed: counts.closed,
            annual_revenue: company.annual_revenue,
            buyers: market.calculated_buyers,
            avg_customer_value: market.avg_customer_value,
        };
        let scenario = self.scenario.compute(&baseline);

        debug!(
            buyers = market.calculated_buyers,
            projected = scenario.total_projected_revenue,
            "Recomputed assessment"
        );

        AssessmentSnapshot {
            market,
            company,
            gaps,
            spend,
            sliders: self.scenario.sliders,
            sliders_visible: self.sliders_visible,
            scenario,
        }
    }
}
