use crate::config::{self, GapmapConfig};
use crate::formatting::FormattingConfig;
use crate::inputs::AssessmentInputs;
use crate::io::{self, create_writer, OutputFormat};
use crate::model::funnel::FunnelMode;
use crate::model::scenario::SliderKind;
use crate::session::{Action, AssessmentSession, DiagnosticReport};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

pub struct AssessConfig {
    pub inputs: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub plain: bool,
    pub mode: Option<FunnelMode>,
    pub visibility: Option<f64>,
    pub lead_gen: Option<f64>,
    pub close_rate: Option<f64>,
}

pub fn handle_assess(assess: AssessConfig) -> Result<()> {
    let config = resolve_config(&assess)?;
    let inputs = AssessmentInputs::load(&assess.inputs)
        .with_context(|| format!("Failed to load inputs from {}", assess.inputs.display()))?;

    let session = build_session(&inputs, &config, &assess);
    let report = session.diagnostic_report();
    info!(
        mode = ?report.snapshot.mode(),
        channels = report.snapshot.spend.channel_count,
        "Assessment computed"
    );

    let format = resolve_format(assess.format, &config);
    let formatting = resolve_formatting(assess.plain, assess.output.is_some(), &config);
    write_report(&report, format, formatting, assess.output.as_ref())
}

fn resolve_config(assess: &AssessConfig) -> Result<GapmapConfig> {
    match &assess.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(config::load_config()),
    }
}

/// Seed the session from the document, then replay command-line overrides
/// as ordinary actions.
pub fn build_session(
    inputs: &AssessmentInputs,
    config: &GapmapConfig,
    assess: &AssessConfig,
) -> AssessmentSession {
    let mut session = AssessmentSession::from_inputs(inputs, config);
    override_actions(&session, assess)
        .into_iter()
        .for_each(|action| session.apply(action));
    session
}

fn override_actions(session: &AssessmentSession, assess: &AssessConfig) -> Vec<Action> {
    let mut actions = Vec::new();
    if assess.mode.is_some_and(|mode| mode != session.mode()) {
        actions.push(Action::ToggleMode);
    }
    let sliders = [
        (SliderKind::Visibility, assess.visibility),
        (SliderKind::LeadGen, assess.lead_gen),
        (SliderKind::CloseRate, assess.close_rate),
    ];
    actions.extend(
        sliders
            .into_iter()
            .filter_map(|(kind, value)| value.map(|v| Action::SetSlider(kind, v))),
    );
    actions
}

fn resolve_format(requested: Option<OutputFormat>, config: &GapmapConfig) -> OutputFormat {
    requested
        .or_else(|| OutputFormat::parse(&config.output().default_format))
        .unwrap_or(OutputFormat::Terminal)
}

fn resolve_formatting(plain: bool, to_file: bool, config: &GapmapConfig) -> FormattingConfig {
    let base = if plain || to_file {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };
    base.with_decimals(config.output().decimals)
}

fn write_report(
    report: &DiagnosticReport,
    format: OutputFormat,
    formatting: FormattingConfig,
    output: Option<&PathBuf>,
) -> Result<()> {
    match output {
        Some(path) => {
            let mut buffer = Vec::new();
            create_writer(&mut buffer, format, formatting).write_report(report)?;
            let content = String::from_utf8(buffer).context("Report is not valid UTF-8")?;
            io::write_file(path, &content)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "Report written");
            Ok(())
        }
        None => {
            let stdout = std::io::stdout();
            create_writer(stdout.lock(), format, formatting).write_report(report)
        }
    }
}
