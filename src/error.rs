use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::collect::types::{CollectOutcome, RunOutcome};
use crate::record::Source;

/// Page retrieval failed. Fatal to the run that issued the fetch.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("GET {url} returned HTTP {status}")]
    Status { url: Url, status: u16 },
    #[error("GET {url} failed: {source}")]
    Network {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
}

/// Price text that holds no usable number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable price {raw:?}")]
pub struct UnparseablePrice {
    raw: String,
}

impl UnparseablePrice {
    pub fn new(raw: &str) -> Self { UnparseablePrice { raw: raw.to_string() } }
    pub fn raw(&self) -> &str { &self.raw }
}

/// A run aborted by a fetch failure, with whatever it had collected before.
#[derive(Debug, Error)]
#[error("run stopped by fetch failure: {source}")]
pub struct RunError {
    pub partial: RunOutcome,
    #[source]
    pub source: RetrievalError,
}

/// `collect_all` stopped at a failing site. `partial` holds everything gathered up to and
/// including the failed site's pages, in site order.
#[derive(Debug, Error)]
#[error("collection aborted at {site}: {source}")]
pub struct CollectError {
    pub site: Source,
    pub partial: CollectOutcome,
    #[source]
    pub source: RunError,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
