//! Formula models behind each panel of the assessment.
//!
//! Every model is a pure function of its inputs: same text in, bitwise-same
//! snapshot out. Nothing here holds state between calls; the
//! [`session`](crate::session) owns the raw inputs and recomputes all
//! snapshots on every change.

pub mod company;
pub mod funnel;
pub mod market;
pub mod scenario;
pub mod spend;

pub use company::{CompanyInputs, CompanySnapshot};
pub use funnel::{FunnelInputs, FunnelMode, GapSnapshot, LeadGenFunnel, RetailFunnel};
pub use market::{MarketInputs, MarketSnapshot};
pub use scenario::{ScenarioBaseline, ScenarioError, ScenarioModel, ScenarioSnapshot, Sliders};
pub use spend::{MarketingChannel, MarketingSpend, SpendBenchmark, SpendTotals, SpendView};
