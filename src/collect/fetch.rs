use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::error::RetrievalError;

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const ACCEPT_LANG: &str = "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Retrieves the HTML of one page. Non-2xx responses are failures; nothing is retried.
pub trait Fetcher {
    async fn fetch(&self, url: &Url) -> Result<String, RetrievalError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANG));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, RetrievalError> {
        let network = |source| RetrievalError::Network { url: url.clone(), source };
        let resp = self.client.get(url.clone()).send().await.map_err(network)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RetrievalError::Status { url: url.clone(), status: status.as_u16() });
        }
        resp.text().await.map_err(network)
    }
}

/// In-memory pages keyed by URL; unknown URLs answer 404. Records every request.
#[cfg(test)]
pub(crate) struct FixtureFetcher {
    pages: std::collections::HashMap<String, String>,
    calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl FixtureFetcher {
    pub fn new() -> Self {
        FixtureFetcher { pages: Default::default(), calls: Default::default() }
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), html.into());
        self
    }

    pub fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }
}

#[cfg(test)]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, RetrievalError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages.get(url.as_str()).cloned()
            .ok_or_else(|| RetrievalError::Status { url: url.clone(), status: 404 })
    }
}
