use std::collections::BTreeMap;

use crate::storage::StoredRow;
use crate::stats::types::*;
use crate::telemetry::{self};

/// Count, per-source price stats (sources in name order) and the `top` cheapest rows.
pub fn summarize_rows(rows: &[StoredRow], top: usize) -> StatsSummary {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in rows { groups.entry(r.source.as_str()).or_default().push(r.price); }

    let by_source = groups.into_iter().map(|(source, prices)| {
        let count = prices.len();
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = prices.iter().sum::<f64>() / count as f64;
        SourceStats { source: source.to_string(), count, min, max, mean }
    }).collect();

    // stable: equal prices keep file order
    let mut sorted: Vec<&StoredRow> = rows.iter().collect();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));
    let cheapest = sorted.into_iter().take(top).map(|r| CheapRow {
        name: r.name.clone(),
        price: r.price,
        currency: r.currency.clone(),
        source: r.source.clone(),
        url: r.url.clone(),
    }).collect();

    // RFC 3339 stamps in one zone order lexicographically
    let last_scraped_at = rows.iter().map(|r| r.scraped_at.as_str()).max().map(str::to_string);

    StatsSummary { total: rows.len(), last_scraped_at, by_source, cheapest }
}

pub fn report(summary: &StatsSummary) {
    let log = telemetry::stats();
    if summary.total == 0 {
        log.info("📭 The data file has no records.");
        return;
    }
    log.info(format!("🧾 Total records: {}", summary.total));
    if let Some(ts) = &summary.last_scraped_at { log.info(format!("   Last scraped: {}", ts)); }

    log.info("💷 Price by source:");
    log.info(format!("  {:<10} {:>6} {:>10} {:>10} {:>10}", "source", "count", "min", "max", "mean"));
    for s in &summary.by_source {
        log.info(format!("  {:<10} {:>6} {:>10.2} {:>10.2} {:>10.2}", s.source, s.count, s.min, s.max, s.mean));
    }

    log.info(format!("🏷️ Top-{} cheapest:", summary.cheapest.len()));
    for r in &summary.cheapest {
        log.info(format!("  {:>9.2} {} [{}] {} {}", r.price, r.currency, r.source, r.name, r.url));
    }
}
