use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use ros_report_core::schema::snapshot_schema;
use ros_report_core::{RegisteredPalettes, Report, ReportOptions, ValidationPolicy, compose_report};
use ros_report_sdk::AnalyticsSnapshot;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

// Ensure the palette module is linked so its themes register.
use mod_palettes as _;

#[derive(Parser, Debug)]
#[command(
    name = "ros-report",
    version,
    about = "Resource optimization executive report",
    author = "ros-report developers"
)]
struct Cli {
    /// Snapshot JSON file, `-` reads standard input
    #[arg(long, short, default_value = "-")]
    input: PathBuf,

    /// Write the report to this file instead of standard output
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output format: markdown, html or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Fail when snapshot counts or percentages do not reconcile
    #[arg(long)]
    strict: bool,

    /// Allowed distance between the sum of state percentages and 100
    #[arg(long, default_value_t = 0.5)]
    percentage_tolerance: f64,

    /// Omit the generation timestamp for reproducible output
    #[arg(long)]
    no_timestamp: bool,

    /// Print the snapshot JSON schema and exit
    #[arg(long)]
    print_schema: bool,

    /// Log composition details to stderr
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Markdown,
    Html,
    Json,
}

impl Cli {
    fn options(&self) -> ReportOptions {
        ReportOptions {
            strict: self.strict,
            validation: ValidationPolicy {
                percentage_tolerance: self.percentage_tolerance,
            },
            generated_at: (!self.no_timestamp).then(chrono::Utc::now),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    if cli.print_schema {
        return emit(
            cli.output.as_deref(),
            &serde_json::to_string_pretty(snapshot_schema())?,
        );
    }

    let snapshot = read_snapshot(&cli.input)?;
    info!(
        "composing report for {} systems from {}",
        snapshot.meta.total_count,
        cli.input.display()
    );

    let report = compose_report(&snapshot, &RegisteredPalettes, &cli.options())?;
    let rendered = render(&report, cli.format)?;
    emit(cli.output.as_deref(), &rendered)
}

fn read_snapshot(path: &Path) -> Result<AnalyticsSnapshot> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read snapshot from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?
    };

    AnalyticsSnapshot::from_json_str(&raw)
        .with_context(|| format!("invalid analytics snapshot in {}", path.display()))
}

fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => report.to_markdown(),
        OutputFormat::Html => report.to_html(&RegisteredPalettes),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report.to_json_value())?),
    }
}

fn emit(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write report to {}", path.display())),
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}
