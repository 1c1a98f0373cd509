use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tracing::Instrument;

use crate::error::{CollectError, RunError};
use crate::output::types::Meta;
use crate::storage;
use crate::stats;
use crate::telemetry::{self};
use crate::telemetry::ops::collect::Phase as CollectPhase;

pub mod driver;
pub mod fetch;
pub mod site;
pub mod types;

use driver::{DriverOptions, PaginationDriver};
use fetch::{Fetcher, HttpFetcher, DEFAULT_TIMEOUT};
use site::SiteConfig;
use types::{CollectOutcome, CollectResult, RunOutcome};

pub const DEFAULT_OUTPUT: &str = "data/prices.csv";

#[derive(Args)]
pub struct CollectCmd {
    /// How many book catalogue pages to fetch (the site has 50)
    #[arg(long, default_value_t = 2)]
    pub max_book_pages: usize,
    /// CSV destination; falls back to PRICES_OUTPUT, then data/prices.csv
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Skip the summary after collecting
    #[arg(long, default_value_t = false)]
    pub no_analyze: bool,
    /// Number of cheapest records in the summary
    #[arg(long, default_value_t = 10)]
    pub top: usize,
    /// Stop paginating when a next link points at an already fetched page
    #[arg(long, default_value_t = false)]
    pub stop_on_revisit: bool,
    /// On a fetch failure, drop what was collected instead of saving it
    #[arg(long, default_value_t = false)]
    pub discard_partial: bool,
}

/// One complete traversal of a single site.
pub async fn run_site<F: Fetcher>(fetcher: &F, site: &SiteConfig, stop_on_revisit: bool) -> Result<RunOutcome, RunError> {
    let log = telemetry::collect();
    let source = site.adapter.source();
    let span = log.span_kv(&CollectPhase::Site, [
        ("source", source.to_string()),
        ("currency", site.adapter.currency().to_string()),
        ("start_url", site.start_url.to_string()),
        ("page_cap", site.page_cap.to_string()),
    ]);
    let options = DriverOptions { page_cap: site.page_cap, stop_on_revisit };
    let outcome = PaginationDriver::new(fetcher, site.adapter.as_ref(), options)
        .run(site.start_url.clone())
        .instrument(span)
        .await?;
    log.run_summary(source, outcome.pages_fetched, outcome.records.len(), &outcome.drops);
    Ok(outcome)
}

/// Runs every site in order and concatenates their records. The first failing site ends
/// the collection; the error carries everything gathered so far.
pub async fn collect_all<F: Fetcher>(fetcher: &F, sites: &[SiteConfig], stop_on_revisit: bool) -> Result<CollectOutcome, CollectError> {
    let mut out = CollectOutcome::default();
    for site in sites {
        match run_site(fetcher, site, stop_on_revisit).await {
            Ok(run) => out.push(run),
            Err(mut err) => {
                let partial = std::mem::replace(&mut err.partial, RunOutcome::new(site.adapter.source()));
                out.push(partial);
                return Err(CollectError { site: site.adapter.source(), partial: out, source: err });
            }
        }
    }
    Ok(out)
}

pub async fn run(args: CollectCmd) -> Result<()> {
    let log = telemetry::collect();
    let output = args.output.clone()
        .or_else(|| env::var("PRICES_OUTPUT").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let span = log.root_span_kv([
        ("max_book_pages", args.max_book_pages.to_string()),
        ("output", output.display().to_string()),
        ("stop_on_revisit", args.stop_on_revisit.to_string()),
    ]);
    collect(args, output).instrument(span).await
}

async fn collect(args: CollectCmd, output: PathBuf) -> Result<()> {
    let log = telemetry::collect();
    let t0 = Instant::now();

    let fetcher = HttpFetcher::new(DEFAULT_TIMEOUT)?;
    let sites = vec![SiteConfig::books(args.max_book_pages)?, SiteConfig::laptops()?];

    let (outcome, failure) = match collect_all(&fetcher, &sites, args.stop_on_revisit).await {
        Ok(outcome) => (outcome, None),
        Err(CollectError { site, partial, source }) => {
            log.error_kv("❌ collection aborted", [("site", site.to_string()), ("error", source.to_string())]);
            let failure = CollectError { site, partial: CollectOutcome::default(), source };
            (partial, Some(failure))
        }
    };

    let keep = failure.is_none() || !args.discard_partial;
    let mut saved = 0usize;
    if outcome.records.is_empty() {
        log.warn("⚠️ nothing collected — check the network connection");
    } else if !keep {
        log.warn(format!("🗑️ discarding {} partial records", outcome.records.len()));
    } else {
        let _s = log.span(&CollectPhase::Persist).entered();
        saved = storage::append(&outcome.records, &output)?;
        log.saved(saved, &output);
    }

    let analysis = if failure.is_none() && saved > 0 && !args.no_analyze {
        let summary = stats::summarize(&output, args.top)?;
        if !telemetry::config::json_mode() { stats::report(&summary); }
        Some(summary)
    } else {
        None
    };

    if telemetry::config::json_mode() {
        let result = CollectResult {
            output,
            saved,
            runs: outcome.runs,
            error: failure.as_ref().map(|e| e.to_string()),
            analysis,
        };
        log.result(&result, Some(Meta { duration_ms: Some(t0.elapsed().as_millis()) }))?;
    }

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
