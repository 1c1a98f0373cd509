use std::path::PathBuf;

use serde::Serialize;

use crate::extraction::DropTally;
use crate::record::{ProductRecord, Source};
use crate::stats::types::StatsSummary;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The last page had no next link.
    #[default]
    LastPage,
    PageCap,
    /// Next link pointed at a page already fetched (only with `stop_on_revisit`).
    Revisit,
}

/// Everything one site's run accumulated.
#[derive(Debug)]
pub struct RunOutcome {
    pub source: Source,
    pub records: Vec<ProductRecord>,
    pub pages_fetched: usize,
    pub drops: DropTally,
    pub stop: StopReason,
}

impl RunOutcome {
    pub fn new(source: Source) -> Self {
        RunOutcome { source, records: Vec::new(), pages_fetched: 0, drops: DropTally::default(), stop: StopReason::default() }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary { source: self.source, pages_fetched: self.pages_fetched, records: self.records.len(), drops: self.drops, stop: self.stop }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub source: Source,
    pub pages_fetched: usize,
    pub records: usize,
    pub drops: DropTally,
    pub stop: StopReason,
}

/// Flat record list in site order plus per-site summaries.
#[derive(Debug, Default)]
pub struct CollectOutcome {
    pub records: Vec<ProductRecord>,
    pub runs: Vec<RunSummary>,
}

impl CollectOutcome {
    pub fn push(&mut self, run: RunOutcome) {
        self.runs.push(run.summary());
        self.records.extend(run.records);
    }
}

// Result envelope for `collect --json`
#[derive(Serialize)]
pub struct CollectResult {
    pub output: PathBuf,
    pub saved: usize,
    pub runs: Vec<RunSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<StatsSummary>,
}
