//! Error types for the surfaces around the calculation core.
//!
//! The models themselves never return errors: malformed text parses to
//! zero, divisions are guarded and the scenario projection falls back to
//! "no change". Errors only arise when reading configuration or input
//! documents and writing reports.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file errors
    #[error("Configuration error{}: {message}", display_path(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Input document could not be read or decoded
    #[error("Invalid input file {}: {message}", .path.display())]
    InputFile { message: String, path: PathBuf },

    /// Input document extension is not one we can decode
    #[error("Unsupported input format '{extension}' (expected toml, json, yaml or yml)")]
    UnsupportedFormat { extension: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML decode errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// YAML errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path context.
    pub fn config_with_path(message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Create an input file error.
    pub fn input_file(message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::InputFile {
            message: message.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Whether the user can fix this by editing a file they wrote
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::InputFile { .. }
                | Self::UnsupportedFormat { .. }
                | Self::Toml(_)
                | Self::Yaml(_)
        )
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::config("bad share");
        assert_eq!(err.to_string(), "Configuration error: bad share");

        let err = Error::config_with_path("bad share", "/tmp/.gapmap.toml");
        assert_eq!(
            err.to_string(),
            "Configuration error in /tmp/.gapmap.toml: bad share"
        );
    }

    #[test]
    fn test_input_file_display() {
        let err = Error::input_file("missing field", "inputs.toml");
        assert_eq!(err.to_string(), "Invalid input file inputs.toml: missing field");
        assert!(err.is_user_fixable());
    }

    #[test]
    fn test_io_error_not_user_fixable() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(!err.is_user_fixable());
    }
}
