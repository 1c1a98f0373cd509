use url::Url;

use crate::extraction::{BooksAdapter, LaptopsAdapter, SiteAdapter};

pub const BOOKS_BASE_URL: &str = "https://books.toscrape.com/";
pub const LAPTOPS_URL: &str = "https://webscraper.io/test-sites/e-commerce/allinone/computers/laptops";

/// One site to collect: where to start, how to read its pages, how far to go.
pub struct SiteConfig {
    pub adapter: Box<dyn SiteAdapter>,
    pub start_url: Url,
    pub page_cap: usize,
}

impl SiteConfig {
    pub fn new(adapter: Box<dyn SiteAdapter>, start_url: Url, page_cap: usize) -> Self {
        SiteConfig { adapter, start_url, page_cap }
    }

    pub fn books(max_pages: usize) -> Result<Self, url::ParseError> {
        Ok(SiteConfig::new(Box::new(BooksAdapter::new()), Url::parse(BOOKS_BASE_URL)?, max_pages))
    }

    /// The laptops listing is a single page.
    pub fn laptops() -> Result<Self, url::ParseError> {
        Ok(SiteConfig::new(Box::new(LaptopsAdapter::new()), Url::parse(LAPTOPS_URL)?, 1))
    }
}
