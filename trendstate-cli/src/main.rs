//! Trendstate CLI: compute configured indicators over a CSV bar file.
//!
//! Commands:
//! - `compute`: run an indicator set from a TOML file over a CSV of bars
//! - `validate`: parse and build an indicator set without computing
//! - `list`: print every indicator type with its default parameters

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trendstate_core::components::precompute::{compute_all, compute_warmup};
use trendstate_core::{Bar, BarSeries, IndicatorConfig, IndicatorSet, IndicatorValues};

#[derive(Parser)]
#[command(
    name = "trendstate",
    about = "Trendstate CLI: stateful trend indicators over OHLCV bars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute an indicator set over a CSV bar file.
    Compute {
        /// Path to a TOML file of `[[indicator]]` tables.
        #[arg(long)]
        config: PathBuf,

        /// CSV with columns date,open,high,low,close,volume.
        #[arg(long)]
        bars: PathBuf,

        /// Write JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Parse and validate an indicator set.
    Validate {
        /// Path to a TOML file of `[[indicator]]` tables.
        #[arg(long)]
        config: PathBuf,
    },
    /// List indicator types and their default parameters.
    List,
}

/// JSON document written by `compute`. Placeholder NaNs serialize as `null`.
#[derive(Debug, Serialize)]
struct ComputeReport {
    bars: usize,
    warmup: usize,
    dates: Vec<NaiveDate>,
    values: IndicatorValues,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            config,
            bars,
            output,
        } => run_compute(&config, &bars, output.as_deref()),
        Commands::Validate { config } => run_validate(&config),
        Commands::List => run_list(&mut std::io::stdout()),
    }
}

fn load_set(path: &Path) -> Result<IndicatorSet> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    IndicatorSet::from_toml_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}

/// Read bars from CSV, sorted by date. Rejects duplicate dates.
fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open bars {}", path.display()))?;

    let mut bars = Vec::new();
    for (row, record) in reader.deserialize::<Bar>().enumerate() {
        let bar = record.with_context(|| format!("{}: bad row {}", path.display(), row + 1))?;
        bars.push(bar);
    }

    bars.sort_by_key(|b| b.date);
    if let Some(pair) = bars.windows(2).find(|w| w[0].date == w[1].date) {
        bail!("{}: duplicate bar for {}", path.display(), pair[0].date);
    }

    let insane = bars.iter().filter(|b| !b.is_sane()).count();
    if insane > 0 {
        warn!(count = insane, "bars with inconsistent OHLC values");
    }

    Ok(bars)
}

fn compute_report(set: &IndicatorSet, bars: &[Bar]) -> Result<ComputeReport> {
    let indicators = set.build()?;
    let series = BarSeries::from_bars(bars);
    let values = compute_all(&indicators, &series)?;

    Ok(ComputeReport {
        bars: series.len(),
        warmup: compute_warmup(&indicators),
        dates: bars.iter().map(|b| b.date).collect(),
        values,
    })
}

fn run_compute(config: &Path, bars_path: &Path, output: Option<&Path>) -> Result<()> {
    let set = load_set(config)?;
    let bars = load_bars(bars_path)?;
    info!(
        indicators = set.indicators.len(),
        bars = bars.len(),
        "computing indicator set"
    );

    let report = compute_report(&set, &bars)?;
    let json = serde_json::to_string_pretty(&report)?;

    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote indicator values");
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn run_validate(config: &Path) -> Result<()> {
    let set = load_set(config)?;
    let indicators = set.build()?;
    for indicator in &indicators {
        println!(
            "{:<32} lookback {:>4}  min bars {:>4}",
            indicator.name(),
            indicator.lookback(),
            indicator.min_len()
        );
    }
    println!("{} indicator(s) OK", indicators.len());
    Ok(())
}

fn run_list(out: &mut impl Write) -> Result<()> {
    for config in IndicatorConfig::all_defaults() {
        writeln!(
            out,
            "{:<16} {}",
            config.type_name(),
            serde_json::to_string(&config)?
        )?;
    }
    Ok(())
}
