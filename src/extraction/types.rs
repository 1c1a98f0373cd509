use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::record::ProductRecord;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropReason { MissingTitle, MissingPrice, UnparseablePrice, BadLink }

impl DropReason {
    pub fn name(&self) -> &'static str { match self {
        DropReason::MissingTitle => "missing_title",
        DropReason::MissingPrice => "missing_price",
        DropReason::UnparseablePrice => "unparseable_price",
        DropReason::BadLink => "bad_link",
    }}
}

/// Items seen on pages versus items dropped, by reason.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DropTally {
    pub seen: usize,
    pub missing_title: usize,
    pub missing_price: usize,
    pub unparseable_price: usize,
    pub bad_link: usize,
}

impl DropTally {
    pub fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::MissingTitle => self.missing_title += 1,
            DropReason::MissingPrice => self.missing_price += 1,
            DropReason::UnparseablePrice => self.unparseable_price += 1,
            DropReason::BadLink => self.bad_link += 1,
        }
    }

    pub fn dropped(&self) -> usize { self.missing_title + self.missing_price + self.unparseable_price + self.bad_link }

    pub fn merge(&mut self, other: &DropTally) {
        self.seen += other.seen;
        self.missing_title += other.missing_title;
        self.missing_price += other.missing_price;
        self.unparseable_price += other.unparseable_price;
        self.bad_link += other.bad_link;
    }
}

/// What one page yielded.
#[derive(Debug, Default)]
pub struct PageExtraction {
    pub records: Vec<ProductRecord>,
    pub next_page_url: Option<Url>,
    pub drops: DropTally,
}

impl PageExtraction {
    /// Tally one item's outcome, keeping the record if there is one.
    pub fn push(&mut self, item: Result<ProductRecord, DropReason>) {
        self.drops.seen += 1;
        match item {
            Ok(rec) => self.records.push(rec),
            Err(reason) => {
                debug!(reason = reason.name(), "item dropped");
                self.drops.record(reason);
            }
        }
    }
}
