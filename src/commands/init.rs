use crate::config::CONFIG_FILE_NAME;
use crate::inputs::AssessmentInputs;
use crate::io;
use crate::model::spend::MarketingChannel;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# Gapmap Configuration

[benchmark]
# Share of annual revenue recommended for marketing (SBA guidance: 7-8%)
marketing_share = 0.08

[scenario]
# Initial slider positions, 0.0-1.0
visibility = 0.05
lead_gen = 0.20
close_rate = 0.20
# Fallbacks used when funnel inputs are empty
visitor_fallback_share = 0.3
default_lead_conversion = 0.1
default_close_rate = 0.2

[output]
default_format = "terminal"
decimals = 0
"#;

pub fn init_config(force: bool, inputs_path: &Path) -> Result<()> {
    init_in(Path::new("."), force, inputs_path)
}

/// Write the config and inputs template relative to `dir`.
pub fn init_in(dir: &Path, force: bool, inputs_path: &Path) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let inputs_path: PathBuf = dir.join(inputs_path);

    for path in [&config_path, &inputs_path] {
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists. Use --force to overwrite.",
                path.display()
            );
        }
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    io::write_file(&inputs_path, &inputs_template().to_toml()?)?;
    println!("Created inputs template {}", inputs_path.display());

    Ok(())
}

fn inputs_template() -> AssessmentInputs {
    let mut inputs = AssessmentInputs::default();
    inputs.market.audience_size = "100k".into();
    inputs.market.buyer_percent = "5".into();
    inputs.market.avg_customer_value = "$1,000".into();
    inputs.company.annual_revenue = "$500k".into();
    inputs.company.percent_new_customers = "30".into();
    inputs.funnel.lead_gen.visitors = "20,000".into();
    inputs.funnel.lead_gen.leads = "800".into();
    inputs.funnel.lead_gen.closed = "150".into();
    inputs.channels = vec![MarketingChannel::new("Search ads", "$200", "$1,500")];
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from;
    use crate::inputs::InputFormat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let temp = TempDir::new().unwrap();
        init_in(temp.path(), false, Path::new("inputs.toml")).unwrap();

        let config = load_config_from(&temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.marketing_share(), 0.08);
        assert_eq!(config.output().default_format, "terminal");
    }

    #[test]
    fn test_template_reloads() {
        let temp = TempDir::new().unwrap();
        init_in(temp.path(), false, Path::new("inputs.toml")).unwrap();

        let text = fs::read_to_string(temp.path().join("inputs.toml")).unwrap();
        let inputs = AssessmentInputs::from_document(&text, InputFormat::Toml).unwrap();
        assert_eq!(inputs, inputs_template());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "# mine\n").unwrap();

        let err = init_in(temp.path(), false, Path::new("inputs.toml")).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(
            fs::read_to_string(temp.path().join(CONFIG_FILE_NAME)).unwrap(),
            "# mine\n"
        );

        init_in(temp.path(), true, Path::new("inputs.toml")).unwrap();
        assert!(fs::read_to_string(temp.path().join(CONFIG_FILE_NAME))
            .unwrap()
            .contains("[benchmark]"));
    }
}
