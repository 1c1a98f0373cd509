use anyhow::Result;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{info, warn, error, Span};
use url::Url;

use super::sink;
use crate::extraction::DropTally;
use crate::output::types::{Envelope, Meta};
use crate::record::Source;

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), "start");
        } else {
            info!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.span(ph);
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), phase = ph.name(), "span_start");
        } else {
            info!(op = %self.op_name(), phase = ph.name(), details = %details, "span_start");
        }
        span
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }
    pub fn warn(&self, msg: impl AsRef<str>) { if self.json { warn!(op = %self.op_name(), "{}", msg.as_ref()); } else { warn!("{}", msg.as_ref()); } }

    pub fn warn_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { warn!(op = %self.op_name(), details = %details, "{}", msg); }
        else { warn!("{} {}", msg, details); }
    }

    pub fn error_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { error!(op = %self.op_name(), details = %details, "{}", msg); }
        else { error!("{} {}", msg, details); }
    }

    pub fn result<T: Serialize>(&self, result: &T, meta: Option<Meta>) -> Result<()> {
        let env = Envelope::result(O::NAME, result, meta)?;
        sink::current_sink().on_result(&env)
    }
}

// Collect-specific helpers
impl LogCtx<crate::telemetry::ops::collect::Collect> {
    pub fn page_summary(&self, source: Source, page: usize, url: &Url, kept: usize, drops: &DropTally) {
        let dropped = drops.dropped();
        if self.json { info!(op = %self.op_name(), %source, page, url = %url, kept, dropped, "page_summary"); }
        else { info!("📄 [{}] page {} — kept={} dropped={} url={}", source, page, kept, dropped, url); }
    }

    pub fn run_summary(&self, source: Source, pages: usize, kept: usize, drops: &DropTally) {
        if self.json {
            info!(op = %self.op_name(), %source, pages, kept, seen = drops.seen, missing_title = drops.missing_title,
                missing_price = drops.missing_price, unparseable_price = drops.unparseable_price, bad_link = drops.bad_link, "run_summary");
        } else {
            info!("✅ [{}] pages={} kept={} seen={} dropped(missing_title={} missing_price={} unparseable_price={} bad_link={})",
                source, pages, kept, drops.seen, drops.missing_title, drops.missing_price, drops.unparseable_price, drops.bad_link);
        }
    }

    pub fn saved(&self, rows: usize, path: &Path) {
        if self.json { info!(op = %self.op_name(), rows, path = %path.display(), "saved"); }
        else { info!("💾 Saved {} rows to {}", rows, path.display()); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
