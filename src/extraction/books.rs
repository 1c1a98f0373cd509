use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::strategy::{resolve, selector, visible_text};
use super::{DropReason, PageExtraction, SiteAdapter};
use crate::price;
use crate::record::{ProductRecord, Source};

/// books.toscrape.com catalogue pages: `article.product_pod` items, `li.next` pagination.
pub struct BooksAdapter {
    item: Selector,
    link: Selector,
    price: Selector,
    next: Selector,
}

impl BooksAdapter {
    pub fn new() -> Self {
        BooksAdapter {
            item: selector("article.product_pod"),
            link: selector("h3 > a"),
            price: selector("p.price_color"),
            next: selector("li.next > a"),
        }
    }

    fn parse_item(&self, art: ElementRef<'_>, page_url: &Url) -> Result<ProductRecord, DropReason> {
        let a = art.select(&self.link).next().ok_or(DropReason::MissingTitle)?;

        // listing text is truncated ("A Light in the ..."); the title attribute is not
        let name = match a.value().attr("title").map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => visible_text(a),
        };
        if name.is_empty() { return Err(DropReason::MissingTitle); }

        let href = a.value().attr("href").unwrap_or("");
        let url = resolve(page_url, href).ok_or(DropReason::BadLink)?;

        let price_el = art.select(&self.price).next().ok_or(DropReason::MissingPrice)?;
        let price = price::normalize(&visible_text(price_el)).map_err(|e| {
            debug!(raw = e.raw(), "price text not numeric");
            DropReason::UnparseablePrice
        })?;

        ProductRecord::new(&name, price, Source::Books, url).ok_or(DropReason::MissingTitle)
    }

    fn next_page(&self, doc: &Html, page_url: &Url) -> Option<Url> {
        let a = doc.select(&self.next).next()?;
        let href = a.value().attr("href")?.trim();
        if href.is_empty() { return None; }
        resolve(page_url, href)
    }
}

impl Default for BooksAdapter {
    fn default() -> Self { Self::new() }
}

impl SiteAdapter for BooksAdapter {
    fn source(&self) -> Source { Source::Books }

    fn extract(&self, html: &str, page_url: &Url) -> PageExtraction {
        let doc = Html::parse_document(html);
        let mut out = PageExtraction::default();
        for art in doc.select(&self.item) {
            out.push(self.parse_item(art, page_url));
        }
        out.next_page_url = self.next_page(&doc, page_url);
        out
    }
}
