use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::GapmapConfig;
use super::sections::{BenchmarkConfig, OutputConfig, ScenarioConfig};
use crate::errors::Error;

pub const CONFIG_FILE_NAME: &str = ".gapmap.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string, replacing invalid sections with defaults
pub fn parse_and_validate_config(contents: &str) -> Result<GapmapConfig, String> {
    let mut config = toml::from_str::<GapmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Some(benchmark) = &config.benchmark {
        if let Err(e) = benchmark.validate() {
            log::warn!("Invalid benchmark config: {}. Using defaults.", e);
            config.benchmark = Some(BenchmarkConfig::default());
        }
    }

    if let Some(scenario) = &config.scenario {
        if let Err(e) = scenario.validate() {
            log::warn!("Invalid scenario config: {}. Using defaults.", e);
            config.scenario = Some(ScenarioConfig::default());
        }
    }

    if let Some(output) = &config.output {
        if let Err(e) = output.validate() {
            log::warn!("Invalid output config: {}. Using defaults.", e);
            config.output = Some(OutputConfig::default());
        }
    }

    Ok(config)
}

/// Load an explicitly requested config file; unlike discovery, a missing
/// or malformed file is an error
pub fn load_config_from(path: &Path) -> Result<GapmapConfig, Error> {
    let contents = read_config_file(path).map_err(|e| Error::config_with_path(e.to_string(), path))?;
    let config = parse_and_validate_config(&contents).map_err(|e| Error::config_with_path(e, path))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<GapmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.gapmap.toml`
pub fn discover_config(start: PathBuf) -> GapmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            GapmapConfig::default()
        })
}

pub fn load_config() -> GapmapConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            GapmapConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            [benchmark]
            marketing_share = 0.1

            [scenario]
            visibility = 0.5

            [output]
            default_format = "json"
            decimals = 2
        "#})
        .unwrap();

        assert_eq!(config.marketing_share(), 0.1);
        assert_eq!(config.scenario().visibility, 0.5);
        assert_eq!(config.scenario().lead_gen, 0.20);
        assert_eq!(config.output().default_format, "json");
        assert_eq!(config.output().decimals, 2);
    }

    #[test]
    fn test_invalid_section_falls_back_to_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [benchmark]
            marketing_share = 4.0

            [scenario]
            close_rate = -1.0
        "#})
        .unwrap();

        assert_eq!(config.benchmark, Some(BenchmarkConfig::default()));
        assert_eq!(config.scenario, Some(ScenarioConfig::default()));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(parse_and_validate_config("[benchmark\nmarketing_share = ").is_err());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, GapmapConfig::default());
        assert_eq!(config.marketing_share(), 0.08);
    }

    #[test]
    fn test_directory_ancestors_limited() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b")
            ]
        );
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[benchmark]\nmarketing_share = 0.12\n",
        )
        .unwrap();
        let nested = temp.path().join("reports").join("2026");
        fs::create_dir_all(&nested).unwrap();

        let config = discover_config(nested);
        assert_eq!(config.marketing_share(), 0.12);
    }

    #[test]
    fn test_load_config_from_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        let result = load_config_from(&temp.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
