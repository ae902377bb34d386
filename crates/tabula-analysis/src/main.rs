//! CLI entry point for dataset profiling and what-if analysis.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use std::process::ExitCode;
use tabula_analysis::{
    AnalysisConfig, AnalysisError, AnalysisReport, AnalysisSession, ChartRequest, ColumnChange,
    DataCleaner, Modification, ReportFormatter, ReportWriter,
};
use tracing::{info, warn};

#[cfg(feature = "ai")]
use std::env;
#[cfg(feature = "ai")]
use std::sync::Arc;
#[cfg(feature = "ai")]
use tabula_analysis::ai::OpenRouterProvider;

/// CLI-compatible change kind enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliChangeKind {
    /// Multiply every value by (1 + p/100)
    PercentIncrease,
    /// Multiply every value by (1 - p/100)
    PercentDecrease,
    /// Replace every value with the given value
    SetValue,
}

impl CliChangeKind {
    fn into_change(self, value: f64) -> ColumnChange {
        match self {
            CliChangeKind::PercentIncrease => ColumnChange::PercentIncrease(value),
            CliChangeKind::PercentDecrease => ColumnChange::PercentDecrease(value),
            CliChangeKind::SetValue => ColumnChange::SetValue(value),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Tabula Team",
    version,
    about = "Statistical profiling and what-if analysis for tabular data",
    long_about = "Cleans a CSV dataset, computes descriptive statistics, and runs\n\
                  what-if scenarios with correlation-based impact propagation.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  OPENROUTER_API_KEY    API key for narrative generation (optional)\n\n\
                  EXAMPLES:\n  \
                  # Profile a dataset\n  \
                  tabula-analysis profile -i data.csv\n\n  \
                  # What-if: raise salary by 10%\n  \
                  tabula-analysis what-if -i data.csv -c salary --change percent-increase --value 10\n\n  \
                  # Numeric-only, machine-readable output\n  \
                  tabula-analysis profile -i data.csv --no-ai --json"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable markdown
    ///
    /// Disables all progress logs; only the final JSON is written.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Output directory for emitted reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Custom output file name (without extension)
    #[arg(long)]
    output_name: Option<String>,

    /// Write a detailed JSON report to the output directory
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Disable narrative generation (numeric-only output)
    #[arg(long, default_value = "false")]
    no_ai: bool,

    /// Correlation materiality threshold (0.0 - 1.0)
    #[arg(long, default_value = "0.1")]
    correlation_threshold: f64,

    /// IQR fence multiplier for outlier counting
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean, profile, and report on a dataset
    Profile {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Run a what-if scenario on one numeric column
    WhatIf {
        #[command(flatten)]
        common: CommonArgs,

        /// Target numeric column to modify
        #[arg(short, long)]
        column: String,

        /// Type of change to apply
        #[arg(long, value_enum)]
        change: CliChangeKind,

        /// Percentage (for percent changes) or replacement value
        #[arg(long)]
        value: f64,
    },

    /// Build a chart spec from the cleaned dataset
    Chart {
        /// Path to the CSV file to chart
        #[arg(short, long)]
        input: String,

        #[command(subcommand)]
        spec: ChartCommand,
    },

    /// Clean a dataset and optionally write the result as CSV
    Clean {
        /// Path to the CSV file to clean
        #[arg(short, long)]
        input: String,

        /// Path for the cleaned CSV output
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ChartCommand {
    /// Histogram of a numeric column
    Histogram {
        #[arg(short, long)]
        column: String,
    },
    /// Bar chart of a categorical column's value counts
    Bar {
        #[arg(short, long)]
        column: String,
    },
    /// Scatter plot of two numeric columns
    Scatter {
        #[arg(short, long)]
        x: String,
        #[arg(short, long)]
        y: String,
    },
}

impl ChartCommand {
    fn into_request(self) -> ChartRequest {
        match self {
            ChartCommand::Histogram { column } => ChartRequest::Histogram { column },
            ChartCommand::Bar { column } => ChartRequest::Bar { column },
            ChartCommand::Scatter { x, y } => ChartRequest::Scatter { x, y },
        }
    }
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);
    dotenv().ok();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Validation failures are user errors; surface the message plainly.
            if let Some(analysis_err) = e.downcast_ref::<AnalysisError>() {
                if analysis_err.is_validation() {
                    eprintln!("Error: {}", analysis_err);
                    return ExitCode::FAILURE;
                }
            }
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Profile { common } => run_profile(common, args.json),
        Command::WhatIf {
            common,
            column,
            change,
            value,
        } => run_what_if(common, column, change, value, args.json),
        Command::Chart { input, spec } => run_chart(input, spec),
        Command::Clean { input, output } => run_clean(input, output, args.json),
    }
}

fn load_csv(path: &str) -> Result<DataFrame> {
    if !Path::new(path).exists() {
        return Err(anyhow!("Input file not found: {}", path));
    }

    info!("Loading dataset from: {}", path);
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))?
        .finish()?;
    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "dataset".to_string())
}

fn build_session(common: &CommonArgs) -> Result<AnalysisSession> {
    let config = AnalysisConfig::builder()
        .correlation_threshold(common.correlation_threshold)
        .iqr_multiplier(common.iqr_multiplier)
        .generate_narrative(!common.no_ai)
        .output_dir(&common.output)
        .build()?;

    let builder = AnalysisSession::builder().config(config);

    #[cfg(feature = "ai")]
    let builder = if common.no_ai {
        builder
    } else {
        match env::var("OPENROUTER_API_KEY") {
            Ok(key) if !key.is_empty() => {
                builder.narrative_provider(Arc::new(OpenRouterProvider::new(key)?))
            }
            _ => {
                warn!("OPENROUTER_API_KEY not set; narrative generation disabled");
                builder
            }
        }
    };

    Ok(builder.build()?)
}

fn emit_report_if_requested(common: &CommonArgs, report: &AnalysisReport, json: bool) -> Result<()> {
    if !common.emit_report {
        return Ok(());
    }

    let writer = ReportWriter::new(common.output.clone().into(), common.output_name.clone());
    let path = writer.write(report, &file_stem(&common.input))?;
    if !json {
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn run_profile(common: CommonArgs, json: bool) -> Result<()> {
    let df = load_csv(&common.input)?;
    let mut session = build_session(&common)?;
    session.ingest(df)?;

    let report = session.analyze(&common.input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if !report.cleaning_actions.is_empty() {
            println!("## Cleaning\n");
            for action in &report.cleaning_actions {
                println!("- {action}");
            }
            println!();
        }
        println!("{}", ReportFormatter::profile_markdown(&report.profile));
        if let Some(narrative) = &report.narrative {
            println!("## Narrative Analysis\n\n{narrative}");
        }
    }

    emit_report_if_requested(&common, &report, json)
}

fn run_what_if(
    common: CommonArgs,
    column: String,
    change: CliChangeKind,
    value: f64,
    json: bool,
) -> Result<()> {
    let df = load_csv(&common.input)?;
    let mut session = build_session(&common)?;
    session.ingest(df)?;

    let modification = Modification {
        column,
        change: change.into_change(value),
    };
    let result = session.run_what_if(&modification)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", ReportFormatter::what_if_markdown(&result));
    }

    if common.emit_report {
        let narrative = result.narrative.clone();
        let report = AnalysisReport::new(
            common.input.clone(),
            session.cleaning_actions().to_vec(),
            session.profile()?,
            Some(result),
            narrative,
        );
        emit_report_if_requested(&common, &report, json)?;
    }
    Ok(())
}

fn run_chart(input: String, spec: ChartCommand) -> Result<()> {
    let df = load_csv(&input)?;
    let config = AnalysisConfig::builder().generate_narrative(false).build()?;
    let mut session = AnalysisSession::builder().config(config).build()?;
    session.ingest(df)?;

    let chart = session.chart(&spec.into_request())?;
    println!("{}", serde_json::to_string_pretty(&chart)?);
    Ok(())
}

fn run_clean(input: String, output: Option<String>, json: bool) -> Result<()> {
    let df = load_csv(&input)?;
    let missing = DataCleaner::missing_summary(&df);
    let (mut cleaned, actions) = DataCleaner::clean(&df)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "missing_summary": missing,
                "cleaning_actions": actions,
            }))?
        );
    } else if actions.is_empty() {
        println!("No missing values found; dataset is already clean.");
    } else {
        println!("## Cleaning\n");
        for action in &actions {
            println!("- {action}");
        }
    }

    if let Some(path) = output {
        let mut file = std::fs::File::create(&path)?;
        CsvWriter::new(&mut file).finish(&mut cleaned)?;
        if !json {
            println!("\nCleaned dataset written to {path}");
        }
    }
    Ok(())
}
