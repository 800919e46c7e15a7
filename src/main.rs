//! Builds the index from a CLUE CSV export, then answers queries read from
//! stdin. Matches go to the report file, comparison counts to stdout.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cluemap::{build_index, Config, QueryDriver, QueryMode, ReportWriter};

#[derive(Parser, Debug)]
#[command(name = "cluemap")]
#[command(about = "Nearest-point and radius queries over CLUE business records")]
struct Args {
    /// CSV export of the CLUE business establishments dataset
    dataset: PathBuf,

    /// Report file that query results are appended to
    report: PathBuf,

    /// How query lines are read (overrides the config file)
    #[arg(short, long, value_enum)]
    mode: Option<QueryMode>,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Empty the report file before answering queries
    #[arg(long)]
    truncate: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => Config::default(),
    };

    // Logs go to stderr; stdout carries the per-query comparison counts.
    let level = args.log_level.as_deref().unwrap_or(&config.log.level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Dataset: {}", args.dataset.display());
    let file = File::open(&args.dataset)
        .with_context(|| format!("Failed to open dataset '{}'", args.dataset.display()))?;
    let tree = build_index(BufReader::new(file), &config.ingest)
        .with_context(|| format!("Failed to read dataset '{}'", args.dataset.display()))?;

    let report = ReportWriter::new(&args.report);
    if args.truncate {
        report.truncate()?;
    }

    let mode = args.mode.unwrap_or(config.query.mode);
    info!("Report: {} (mode {:?})", report.path().display(), mode);

    let driver = QueryDriver::new(&tree, report, mode);
    let summary = driver
        .run(io::stdin().lock(), io::stdout().lock())
        .context("Query run aborted")?;
    info!("Done after {} queries", summary.queries);

    Ok(())
}
