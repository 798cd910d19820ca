use crate::io::output::OutputFormat;
use crate::model::funnel::FunnelMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Visitors -> leads -> closed
    LeadGen,
    /// Visitors -> closed
    Retail,
}

impl From<ModeArg> for FunnelMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::LeadGen => FunnelMode::LeadGen,
            ModeArg::Retail => FunnelMode::Retail,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gapmap")]
#[command(about = "Business gap analysis: market, funnel and marketing-spend diagnostics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute every panel from an inputs document (.toml, .json, .yaml)
    Assess {
        /// Inputs document
        inputs: PathBuf,

        /// Output format (defaults to the configured format, else terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to .gapmap.toml discovery)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Plain output: no colors
        #[arg(long)]
        plain: bool,

        /// Override the funnel mode from the inputs document
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Visibility improvement slider (0.0-1.0)
        #[arg(long)]
        visibility: Option<f64>,

        /// Lead generation improvement slider (0.0-1.0)
        #[arg(long = "lead-gen")]
        lead_gen: Option<f64>,

        /// Close rate improvement slider (0.0-1.0)
        #[arg(long = "close-rate")]
        close_rate: Option<f64>,
    },

    /// Write a starter .gapmap.toml and inputs template
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Where to write the inputs template
        #[arg(long, default_value = "gapmap-inputs.toml")]
        inputs: PathBuf,
    },

    /// Show how human-entered numbers are parsed
    Parse {
        /// Values such as "$1.2M", "50%", "1,500"
        #[arg(required = true)]
        values: Vec<String>,

        /// Emit the parsed values as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_assess_arguments() {
        let cli = Cli::try_parse_from([
            "gapmap",
            "-vv",
            "assess",
            "inputs.toml",
            "--format",
            "json",
            "--mode",
            "retail",
            "--lead-gen",
            "0.5",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Assess {
                inputs,
                format,
                mode,
                lead_gen,
                visibility,
                ..
            } => {
                assert_eq!(inputs, PathBuf::from("inputs.toml"));
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(mode, Some(ModeArg::Retail));
                assert_eq!(lead_gen, Some(0.5));
                assert_eq!(visibility, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_requires_values() {
        assert!(Cli::try_parse_from(["gapmap", "parse"]).is_err());
    }

    #[test]
    fn test_parse_json_flag() {
        let cli = Cli::try_parse_from(["gapmap", "parse", "--json", "1.5k"]).unwrap();
        match cli.command {
            Commands::Parse { values, json } => {
                assert_eq!(values, vec!["1.5k".to_string()]);
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
