use url::Url;

use crate::record::{Currency, Source};

mod books;
mod laptops;
pub mod strategy;
pub mod types;

pub use books::BooksAdapter;
pub use laptops::LaptopsAdapter;
pub use types::{DropReason, DropTally, PageExtraction};

/// Site-specific HTML to record extraction. Adding a site means adding an implementor;
/// the pagination driver never changes.
pub trait SiteAdapter {
    fn source(&self) -> Source;

    fn currency(&self) -> Currency { self.source().currency() }

    /// Item-level faults are tallied in the result, never returned as errors.
    fn extract(&self, html: &str, page_url: &Url) -> PageExtraction;
}
