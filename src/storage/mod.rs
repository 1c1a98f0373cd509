use std::fs::{self, OpenOptions};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::record::{Currency, ProductRecord, Source};
use crate::util::time::format_scraped_at;

// Field order is the column order.
#[derive(Serialize)]
struct Row<'a> {
    name: &'a str,
    price: f64,
    currency: Currency,
    source: Source,
    url: &'a str,
    scraped_at: &'a str,
}

/// A row read back from the store. Kept loose so files written by other tools still load.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredRow {
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub source: String,
    pub url: String,
    pub scraped_at: String,
}

/// Append records to the CSV at `path`, stamping the whole batch with the current time.
pub fn append(records: &[ProductRecord], path: &Path) -> Result<usize, StorageError> {
    append_at(records, path, Utc::now())
}

/// The header is written only when the file does not exist yet; existing files grow.
/// Nothing is deduplicated. An empty batch leaves the filesystem untouched.
pub fn append_at(records: &[ProductRecord], path: &Path, scraped_at: DateTime<Utc>) -> Result<usize, StorageError> {
    if records.is_empty() { return Ok(0); }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::Io { path: parent.to_path_buf(), source })?;
    }
    let fresh = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)
        .map_err(|source| StorageError::Io { path: path.to_path_buf(), source })?;

    let csv_err = |source| StorageError::Csv { path: path.to_path_buf(), source };
    let mut w = csv::WriterBuilder::new().has_headers(fresh).from_writer(file);
    let stamp = format_scraped_at(scraped_at);
    for rec in records {
        w.serialize(Row {
            name: rec.name(),
            price: rec.price(),
            currency: rec.currency(),
            source: rec.source(),
            url: rec.url().as_str(),
            scraped_at: &stamp,
        }).map_err(csv_err)?;
    }
    w.flush().map_err(|source| StorageError::Io { path: path.to_path_buf(), source })?;
    Ok(records.len())
}

pub fn load(path: &Path) -> Result<Vec<StoredRow>, StorageError> {
    let csv_err = |source| StorageError::Csv { path: path.to_path_buf(), source };
    let mut rdr = csv::Reader::from_path(path).map_err(csv_err)?;
    rdr.deserialize().collect::<Result<Vec<StoredRow>, _>>().map_err(csv_err)
}
