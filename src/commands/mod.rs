//! CLI command implementations.
//!
//! - **assess**: compute every panel from an inputs document and write a report
//! - **init**: write a starter `.gapmap.toml` and inputs template
//! - **parse**: show how human-entered numbers are interpreted

pub mod assess;
pub mod init;
pub mod parse;

pub use assess::{handle_assess, AssessConfig};
pub use init::init_config;
pub use parse::{parse_values, ParsedValue};
