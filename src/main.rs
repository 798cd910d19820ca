use anyhow::Result;
use clap::Parser;
use gapmap::cli::{Cli, Commands};
use gapmap::commands::{self, AssessConfig};
use gapmap::observability::{init_tracing, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Assess {
            inputs,
            format,
            output,
            config,
            plain,
            mode,
            visibility,
            lead_gen,
            close_rate,
        } => commands::handle_assess(AssessConfig {
            inputs,
            format,
            output,
            config,
            plain,
            mode: mode.map(Into::into),
            visibility,
            lead_gen,
            close_rate,
        }),
        Commands::Init { force, inputs } => commands::init_config(force, &inputs),
        Commands::Parse { values, json } => commands::parse_values(&values, json),
    }
}
