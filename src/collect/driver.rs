use std::collections::HashSet;

use tracing::Instrument;
use url::Url;

use super::fetch::Fetcher;
use super::types::{RunOutcome, StopReason};
use crate::error::RunError;
use crate::extraction::SiteAdapter;
use crate::telemetry::{self};
use crate::telemetry::ops::collect::Phase as CollectPhase;

#[derive(Copy, Clone, Debug)]
pub struct DriverOptions {
    pub page_cap: usize,
    /// Stop when a next link points at a page this run already fetched.
    /// Off by default: the page cap is the only bound.
    pub stop_on_revisit: bool,
}

enum State {
    Fetching(Url),
    Extracting { url: Url, html: String },
    Done(StopReason),
}

/// Follows an adapter's next-page links one page at a time, up to the page cap.
pub struct PaginationDriver<'a, F: Fetcher> {
    fetcher: &'a F,
    adapter: &'a dyn SiteAdapter,
    options: DriverOptions,
}

impl<'a, F: Fetcher> PaginationDriver<'a, F> {
    pub fn new(fetcher: &'a F, adapter: &'a dyn SiteAdapter, options: DriverOptions) -> Self {
        PaginationDriver { fetcher, adapter, options }
    }

    pub async fn run(&self, start: Url) -> Result<RunOutcome, RunError> {
        let log = telemetry::collect();
        let source = self.adapter.source();
        let mut outcome = RunOutcome::new(source);
        let mut visited: HashSet<Url> = HashSet::new();

        let mut state = if self.options.page_cap == 0 { State::Done(StopReason::PageCap) } else { State::Fetching(start) };
        loop {
            state = match state {
                State::Fetching(url) => {
                    let span = log.span_kv(&CollectPhase::FetchPage, [("source", source.to_string()), ("url", url.to_string())]);
                    match self.fetcher.fetch(&url).instrument(span).await {
                        Ok(html) => {
                            visited.insert(url.clone());
                            State::Extracting { url, html }
                        }
                        Err(err) => {
                            log.error_kv("❌ fetch failed", [("url", url.to_string()), ("error", err.to_string())]);
                            return Err(RunError { partial: outcome, source: err });
                        }
                    }
                }
                State::Extracting { url, html } => {
                    let page = { let _s = log.span(&CollectPhase::Extract).entered(); self.adapter.extract(&html, &url) };
                    outcome.pages_fetched += 1;
                    log.page_summary(source, outcome.pages_fetched, &url, page.records.len(), &page.drops);
                    outcome.drops.merge(&page.drops);
                    outcome.records.extend(page.records);

                    match page.next_page_url {
                        None => State::Done(StopReason::LastPage),
                        Some(_) if outcome.pages_fetched >= self.options.page_cap => State::Done(StopReason::PageCap),
                        Some(next) if self.options.stop_on_revisit && visited.contains(&next) => {
                            log.warn_kv("↩️ next page already fetched, stopping", [("url", next.to_string())]);
                            State::Done(StopReason::Revisit)
                        }
                        Some(next) => State::Fetching(next),
                    }
                }
                State::Done(stop) => {
                    outcome.stop = stop;
                    return Ok(outcome);
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::fetch::FixtureFetcher;
    use crate::error::RetrievalError;
    use crate::extraction::BooksAdapter;
    use crate::record::{Currency, Source};

    const BASE: &str = "https://books.toscrape.com/catalogue/";

    fn books_page(prices: &[&str], next: Option<&str>) -> String {
        let items: String = prices.iter().enumerate().map(|(i, p)| format!(
            r#"<article class="product_pod"><h3><a href="book_{i}/index.html" title="Book {i}">Book {i}</a></h3><p class="price_color">{p}</p></article>"#
        )).collect();
        let next = next.map(|n| format!(r#"<li class="next"><a href="{n}">next</a></li>"#)).unwrap_or_default();
        format!("<html><body><ol>{items}</ol><ul class=\"pager\">{next}</ul></body></html>")
    }

    fn url(page: &str) -> String { format!("{BASE}{page}") }

    fn start() -> Url { Url::parse(&url("page-1.html")).unwrap() }

    fn opts(page_cap: usize) -> DriverOptions { DriverOptions { page_cap, stop_on_revisit: false } }

    #[tokio::test]
    async fn two_page_chain_yields_all_records() {
        let fetcher = FixtureFetcher::new()
            .page(&url("page-1.html"), books_page(&["£1.00", "£2.00", "£3.00"], Some("page-2.html")))
            .page(&url("page-2.html"), books_page(&["£4.00", "£5.00"], None));
        let adapter = BooksAdapter::new();
        let out = PaginationDriver::new(&fetcher, &adapter, opts(5)).run(start()).await.unwrap();

        assert_eq!(out.records.len(), 5);
        assert!(out.records.iter().all(|r| r.source() == Source::Books && r.currency() == Currency::Gbp));
        let prices: Vec<f64> = out.records.iter().map(|r| r.price()).collect();
        assert_eq!(prices, [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(out.pages_fetched, 2);
        assert_eq!(out.stop, StopReason::LastPage);
        assert_eq!(fetcher.calls(), [url("page-1.html"), url("page-2.html")]);
    }

    #[tokio::test]
    async fn page_cap_bounds_fetches() {
        let mut fetcher = FixtureFetcher::new();
        for n in 1..=6 {
            let next = format!("page-{}.html", n + 1);
            fetcher = fetcher.page(&url(&format!("page-{n}.html")), books_page(&["£1.00"], Some(&next)));
        }
        let adapter = BooksAdapter::new();
        let out = PaginationDriver::new(&fetcher, &adapter, opts(3)).run(start()).await.unwrap();

        assert_eq!(fetcher.calls().len(), 3);
        assert_eq!(out.pages_fetched, 3);
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.stop, StopReason::PageCap);
    }

    #[tokio::test]
    async fn no_next_link_stops_after_one_page() {
        let fetcher = FixtureFetcher::new().page(&url("page-1.html"), books_page(&["£9.99"], None));
        let adapter = BooksAdapter::new();
        let out = PaginationDriver::new(&fetcher, &adapter, opts(50)).run(start()).await.unwrap();
        assert_eq!(fetcher.calls().len(), 1);
        assert_eq!(out.pages_fetched, 1);
    }

    #[tokio::test]
    async fn zero_cap_fetches_nothing() {
        let fetcher = FixtureFetcher::new();
        let adapter = BooksAdapter::new();
        let out = PaginationDriver::new(&fetcher, &adapter, opts(0)).run(start()).await.unwrap();
        assert!(fetcher.calls().is_empty());
        assert!(out.records.is_empty());
        assert_eq!(out.stop, StopReason::PageCap);
    }

    #[tokio::test]
    async fn self_link_refetched_until_cap_by_default() {
        let fetcher = FixtureFetcher::new().page(&url("page-1.html"), books_page(&["£1.00"], Some("page-1.html")));
        let adapter = BooksAdapter::new();
        let out = PaginationDriver::new(&fetcher, &adapter, opts(4)).run(start()).await.unwrap();
        assert_eq!(fetcher.calls().len(), 4);
        assert_eq!(out.records.len(), 4);
        assert_eq!(out.stop, StopReason::PageCap);
    }

    #[tokio::test]
    async fn stop_on_revisit_breaks_self_link() {
        let fetcher = FixtureFetcher::new().page(&url("page-1.html"), books_page(&["£1.00"], Some("page-1.html")));
        let adapter = BooksAdapter::new();
        let options = DriverOptions { page_cap: 4, stop_on_revisit: true };
        let out = PaginationDriver::new(&fetcher, &adapter, options).run(start()).await.unwrap();
        assert_eq!(fetcher.calls().len(), 1);
        assert_eq!(out.stop, StopReason::Revisit);
    }

    #[tokio::test]
    async fn fetch_failure_keeps_partial_records() {
        let fetcher = FixtureFetcher::new()
            .page(&url("page-1.html"), books_page(&["£1.00", "£2.00"], Some("page-2.html")));
        let adapter = BooksAdapter::new();
        let err = PaginationDriver::new(&fetcher, &adapter, opts(5)).run(start()).await.unwrap_err();

        assert_eq!(err.partial.records.len(), 2);
        assert_eq!(err.partial.pages_fetched, 1);
        assert!(matches!(err.source, RetrievalError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn drops_accumulate_across_pages() {
        let fetcher = FixtureFetcher::new()
            .page(&url("page-1.html"), books_page(&["£1.00", "Free"], Some("page-2.html")))
            .page(&url("page-2.html"), books_page(&["N/A", "£2.00"], None));
        let adapter = BooksAdapter::new();
        let out = PaginationDriver::new(&fetcher, &adapter, opts(5)).run(start()).await.unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.drops.seen, 4);
        assert_eq!(out.drops.unparseable_price, 2);
    }
}
