//! Configuration loaded from `.gapmap.toml`.
//!
//! Discovery walks up from the current directory. A missing file means
//! defaults; an invalid section is replaced by its defaults with a warning.

mod core;
mod loader;
mod sections;

pub use self::core::GapmapConfig;
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use sections::{
    default_close_rate, default_close_rate_slider, default_format, default_lead_conversion,
    default_lead_gen, default_marketing_share, default_visibility, default_visitor_fallback_share,
    BenchmarkConfig, OutputConfig, ScenarioConfig,
};
