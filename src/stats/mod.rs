use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::collect::DEFAULT_OUTPUT;
use crate::storage;
use crate::telemetry::{self};
use crate::telemetry::ops::stats::Phase as StatsPhase;

pub mod summary;
pub mod types;

pub use summary::report;
use types::StatsSummary;

#[derive(Args, Debug)]
pub struct StatsCmd {
    /// CSV store to read; falls back to PRICES_OUTPUT, then data/prices.csv
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Number of cheapest records to list (default: 10)
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

pub async fn run(args: StatsCmd) -> Result<()> {
    let log = telemetry::stats();
    let path = args.path
        .or_else(|| env::var("PRICES_OUTPUT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let _g = log.root_span_kv([("path", path.display().to_string()), ("top", args.top.to_string())]).entered();

    let summary = summarize(&path, args.top)?;
    if telemetry::config::json_mode() {
        log.result(&summary, None)?;
    } else {
        report(&summary);
    }
    Ok(())
}

/// Read the store and summarize it. Read-only.
pub fn summarize(path: &Path, top: usize) -> Result<StatsSummary> {
    let log = telemetry::stats();
    let rows = {
        let _s = log.span(&StatsPhase::Load).entered();
        storage::load(path).with_context(|| format!("reading {}", path.display()))?
    };
    let _s = log.span(&StatsPhase::Summarize).entered();
    Ok(summary::summarize_rows(&rows, top))
}
