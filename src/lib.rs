//! Business gap analysis.
//!
//! Turns a handful of free-text business figures (market size, revenue,
//! funnel counts, marketing channels) into derived diagnostics: market
//! share, funnel-stage gaps, a revenue-based marketing budget benchmark and
//! an improvement scenario. Every derived value is recomputed from the raw
//! inputs on each [`AssessmentSession::snapshot`] call.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod inputs;
pub mod io;
pub mod model;
pub mod observability;
pub mod parsing;
pub mod session;

pub use crate::config::GapmapConfig;
pub use crate::core::{guarded_div, Percent, Ratio};
pub use crate::errors::Error;
pub use crate::inputs::{AssessmentInputs, InputFormat, SliderInputs};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::model::{
    CompanySnapshot, FunnelMode, GapSnapshot, MarketSnapshot, MarketingChannel, MarketingSpend,
    ScenarioSnapshot, Sliders, SpendView,
};
pub use crate::parsing::{parse_amount, parse_percent_as_fraction};
pub use crate::session::{
    Action, AssessmentSession, AssessmentSnapshot, DiagnosticReport, InputField,
};
