use crate::core::Ratio;
use crate::formatting::{
    compact, currency, format_fraction, format_percent, format_ratio, formatter_for,
    FormattingConfig, OutputFormatter,
};
use crate::model::funnel::GapSnapshot;
use crate::model::spend::SpendView;
use crate::session::{AssessmentSnapshot, DiagnosticReport};
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{ContentArrangement, Table};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            "terminal" => Some(Self::Terminal),
            _ => None,
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &DiagnosticReport) -> anyhow::Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(
    writer: W,
    format: OutputFormat,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer, formatting.decimals)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &DiagnosticReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Label/value rows shared by the markdown and terminal writers, one list
/// per panel.
pub struct ReportRows {
    pub market: Vec<(&'static str, String)>,
    pub company: Vec<(&'static str, String)>,
    pub gaps: Vec<(&'static str, String)>,
    pub spend: Vec<(&'static str, String)>,
    pub scenario: Vec<(&'static str, String)>,
}

impl ReportRows {
    pub fn from_snapshot(snapshot: &AssessmentSnapshot, decimals: usize) -> Self {
        let market = &snapshot.market;
        let company = &snapshot.company;
        let spend = &snapshot.spend;
        let scenario = &snapshot.scenario;

        let spend_rows = match spend.view {
            SpendView::ChannelTable => vec![
                ("Channels", spend.channel_count.to_string()),
                ("Total monthly spend", currency(spend.totals.total_monthly_spend, decimals)),
                ("Total yearly spend", currency(spend.totals.total_yearly_spend, decimals)),
            ],
            SpendView::SbaBenchmark => vec![
                ("Current monthly spend", currency(spend.totals.total_monthly_spend, decimals)),
                (
                    "Recommended monthly budget",
                    currency(spend.benchmark.recommended_monthly_budget, decimals),
                ),
                (
                    "Additional monthly budget needed",
                    currency(spend.benchmark.additional_monthly_budget_needed, decimals),
                ),
                (
                    "Spend as share of revenue",
                    format_fraction(spend.benchmark.percent_of_annual_revenue, decimals),
                ),
            ],
        };

        Self {
            market: vec![
                ("Audience size", compact(market.audience_size, 1)),
                ("Buyers", compact(market.calculated_buyers, 1)),
                ("Average customer value", currency(market.avg_customer_value, decimals)),
                ("Total market revenue", currency(market.total_market_revenue, decimals)),
            ],
            company: vec![
                ("Annual revenue", currency(company.annual_revenue, decimals)),
                ("Total customers", format!("{:.0}", company.calculated_total_customers)),
                ("New customers", format!("{:.0}", company.calculated_new_customers)),
                (
                    "Share of market revenue",
                    format_percent(company.percent_of_market_rev_share, decimals.max(2)),
                ),
            ],
            gaps: gap_rows(&snapshot.gaps, decimals),
            spend: spend_rows,
            scenario: vec![
                ("Visibility improvement", format_ratio(snapshot.sliders.visibility, 0)),
                ("Lead gen improvement", format_ratio(snapshot.sliders.lead_gen, 0)),
                ("Close rate improvement", format_ratio(snapshot.sliders.close_rate, 0)),
                ("Additional leads", format!("{:.0}", scenario.additional_leads)),
                ("Additional new accounts", format!("{:.0}", scenario.additional_new_accounts)),
                ("Additional revenue", currency(scenario.additional_revenue, decimals)),
                (
                    "Total projected revenue",
                    currency(scenario.total_projected_revenue, decimals),
                ),
            ],
        }
    }

    fn panels(&self) -> [(&'static str, &[(&'static str, String)]); 5] {
        [
            ("Market", self.market.as_slice()),
            ("Company", self.company.as_slice()),
            ("Funnel Gaps", self.gaps.as_slice()),
            ("Marketing Spend", self.spend.as_slice()),
            ("Scenario", self.scenario.as_slice()),
        ]
    }
}

fn gap_rows(gaps: &GapSnapshot, decimals: usize) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Mode", mode_label(gaps).to_string()),
        ("Visibility reach gap", format_ratio(gaps.visibility_reach_gap(), decimals)),
    ];
    if let Some(lead_gen_gap) = gaps.lead_gen_gap() {
        rows.push(("Lead gen gap", format_ratio(lead_gen_gap, decimals)));
    }
    rows.push(("Close rate gap", format_ratio(gaps.close_rate_gap(), decimals)));
    rows
}

fn mode_label(gaps: &GapSnapshot) -> &'static str {
    match gaps {
        GapSnapshot::LeadGen { .. } => "Lead generation",
        GapSnapshot::Retail { .. } => "Retail",
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
    decimals: usize,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W, decimals: usize) -> Self {
        Self { writer, decimals }
    }

    fn write_panel(&mut self, title: &str, rows: &[(&'static str, String)]) -> anyhow::Result<()> {
        writeln!(self.writer, "## {title}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        for (label, value) in rows {
            writeln!(self.writer, "| {label} | {value} |")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &DiagnosticReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Gap Analysis")?;
        writeln!(self.writer)?;

        let rows = ReportRows::from_snapshot(&report.snapshot, self.decimals);
        for (title, panel) in rows.panels() {
            self.write_panel(title, panel)?;
        }

        if !report.inputs.notes.is_empty() {
            writeln!(self.writer, "## Notes")?;
            writeln!(self.writer)?;
            for (panel, html) in &report.inputs.notes {
                writeln!(self.writer, "- **{panel}**: {html}")?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    config: FormattingConfig,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, config: FormattingConfig) -> Self {
        Self {
            writer,
            config,
            formatter: formatter_for(config),
        }
    }

    fn table(&self, rows: &[(&'static str, String)]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.config.color.should_use_color() {
                UTF8_FULL
            } else {
                ASCII_FULL
            })
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Metric", "Value"]);
        for (label, value) in rows {
            table.add_row(vec![label.to_string(), value.clone()]);
        }
        table
    }

    fn write_highlights(&mut self, snapshot: &AssessmentSnapshot) -> anyhow::Result<()> {
        let decimals = self.config.decimals;
        let needed = snapshot.spend.benchmark.additional_monthly_budget_needed;
        let budget_line = if needed > 0.0 {
            self.formatter.negative(&format!(
                "Marketing budget short by {} per month",
                currency(needed, decimals)
            ))
        } else {
            self.formatter.positive("Marketing spend meets the benchmark")
        };
        writeln!(self.writer, "{budget_line}")?;

        let (label, worst) = worst_gap(&snapshot.gaps);
        let gap_line = format!("Largest funnel gap: {} ({})", label, format_ratio(worst, decimals));
        if worst.get() >= 0.5 {
            writeln!(self.writer, "{}", self.formatter.negative(&gap_line))?;
        } else {
            writeln!(self.writer, "{}", self.formatter.dim(&gap_line))?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &DiagnosticReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header("Gap Analysis"))?;
        writeln!(self.writer, "{}", self.formatter.header("============"))?;
        writeln!(self.writer)?;

        let rows = ReportRows::from_snapshot(&report.snapshot, self.config.decimals);
        for (title, panel) in rows.panels() {
            let table = self.table(panel);
            writeln!(self.writer, "{}", self.formatter.bold(title))?;
            writeln!(self.writer, "{table}")?;
            writeln!(self.writer)?;
        }

        self.write_highlights(&report.snapshot)?;
        Ok(())
    }
}

/// The stage losing the largest share of volume.
pub fn worst_gap(gaps: &GapSnapshot) -> (&'static str, Ratio) {
    let mut stages = vec![("visibility reach", gaps.visibility_reach_gap())];
    if let Some(lead_gen_gap) = gaps.lead_gen_gap() {
        stages.push(("lead generation", lead_gen_gap));
    }
    stages.push(("close rate", gaps.close_rate_gap()));

    stages
        .into_iter()
        .fold(("visibility reach", Ratio::ZERO), |worst, stage| {
            if stage.1 > worst.1 {
                stage
            } else {
                worst
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::spend::MarketingChannel;
    use crate::session::{Action, AssessmentSession, InputField};

    fn report() -> DiagnosticReport {
        let mut session = AssessmentSession::new();
        for (field, text) in [
            (InputField::AudienceSize, "1M"),
            (InputField::BuyerPercent, "10"),
            (InputField::AvgCustomerValue, "$1k"),
            (InputField::AnnualRevenue, "$600k"),
            (InputField::LeadGenVisitors, "10000"),
            (InputField::LeadGenLeads, "1000"),
            (InputField::LeadGenClosed, "100"),
        ] {
            session.set_input(field, text);
        }
        session.apply(Action::AddChannel(MarketingChannel::new("Ads", "$500", "$1,500")));
        session.diagnostic_report()
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        create_writer(&mut buffer, format, FormattingConfig::plain())
            .write_report(&report())
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_json_writer_emits_report() {
        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(json["snapshot"]["market"]["total_market_revenue"], 100_000_000.0);
        assert_eq!(json["snapshot"]["spend"]["total_monthly_spend"], 2000.0);
    }

    #[test]
    fn test_markdown_writer_has_every_panel() {
        let markdown = render(OutputFormat::Markdown);
        for heading in ["## Market", "## Company", "## Funnel Gaps", "## Marketing Spend", "## Scenario"] {
            assert!(markdown.contains(heading), "missing {heading}");
        }
        assert!(markdown.contains("| Total market revenue | $100,000,000 |"));
        assert!(markdown.contains("| Lead gen gap | 90% |"));
    }

    #[test]
    fn test_terminal_writer_plain_has_no_escape_codes() {
        let text = render(OutputFormat::Terminal);
        assert!(text.contains("Gap Analysis"));
        assert!(text.contains("$100,000,000"));
        assert!(text.contains("Marketing budget short by $2,000 per month"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_worst_gap_picks_largest() {
        let gaps = GapSnapshot::LeadGen {
            visibility_reach_gap: Ratio::clamped(0.2),
            lead_gen_gap: Ratio::clamped(0.7),
            close_rate_gap: Ratio::clamped(0.4),
        };
        assert_eq!(worst_gap(&gaps), ("lead generation", Ratio::clamped(0.7)));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("MD"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::parse("xml"), None);
    }
}
