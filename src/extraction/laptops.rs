use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::strategy::{resolve, selector, visible_text, FieldStrategy};
use super::{DropReason, PageExtraction, SiteAdapter};
use crate::price;
use crate::record::{ProductRecord, Source};

/// webscraper.io e-commerce demo, laptops category. Single page.
pub struct LaptopsAdapter {
    card: Selector,
    title: FieldStrategy,
    price: FieldStrategy,
}

impl LaptopsAdapter {
    pub fn new() -> Self {
        LaptopsAdapter {
            card: selector("div.col-sm-4.col-lg-4.col-md-4"),
            // card markup is not uniform; looser selectors catch the stragglers
            title: FieldStrategy::new(&["a.title", "a"]),
            price: FieldStrategy::new(&["h4.price", "h4.pull-right"]),
        }
    }

    fn parse_card(&self, card: ElementRef<'_>, page_url: &Url) -> Result<ProductRecord, DropReason> {
        let title = self.title.locate(card).ok_or(DropReason::MissingTitle)?;
        let price_el = self.price.locate(card).ok_or(DropReason::MissingPrice)?;

        let price = price::normalize(&visible_text(price_el)).map_err(|e| {
            debug!(raw = e.raw(), "price text not numeric");
            DropReason::UnparseablePrice
        })?;
        let href = title.value().attr("href").unwrap_or("");
        let url = resolve(page_url, href).ok_or(DropReason::BadLink)?;

        ProductRecord::new(&visible_text(title), price, Source::Laptops, url).ok_or(DropReason::MissingTitle)
    }
}

impl Default for LaptopsAdapter {
    fn default() -> Self { Self::new() }
}

impl SiteAdapter for LaptopsAdapter {
    fn source(&self) -> Source { Source::Laptops }

    fn extract(&self, html: &str, page_url: &Url) -> PageExtraction {
        let doc = Html::parse_document(html);
        let mut out = PageExtraction::default();
        for card in doc.select(&self.card) {
            out.push(self.parse_card(card, page_url));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Currency;

    const PAGE: &str = "https://webscraper.io/test-sites/e-commerce/allinone/computers/laptops";

    fn card(inner: &str) -> String {
        format!(r#"<div class="col-sm-4 col-lg-4 col-md-4"><div class="thumbnail"><div class="caption">{inner}</div></div></div>"#)
    }

    fn page(cards: &[String]) -> String {
        format!("<html><body><div class=\"row\">{}</div></body></html>", cards.join("\n"))
    }

    fn page_url() -> Url { Url::parse(PAGE).unwrap() }

    #[test]
    fn primary_selectors() {
        let html = page(&[card(r#"
            <h4 class="pull-right price">$295.99</h4>
            <h4><a href="/test-sites/e-commerce/allinone/product/545" class="title" title="Asus VivoBook X441NA-GA190">Asus VivoBook X441NA-GA190</a></h4>
            <p class="description">Chocolate Black, 14"</p>"#)]);
        let out = LaptopsAdapter::new().extract(&html, &page_url());
        assert_eq!(out.records.len(), 1);
        let rec = &out.records[0];
        assert_eq!(rec.name(), "Asus VivoBook X441NA-GA190");
        assert_eq!(rec.price(), 295.99);
        assert_eq!(rec.currency(), Currency::Usd);
        assert_eq!(rec.source(), Source::Laptops);
        assert_eq!(rec.url().as_str(), "https://webscraper.io/test-sites/e-commerce/allinone/product/545");
        assert!(out.next_page_url.is_none());
    }

    #[test]
    fn fallback_price_class_used_when_primary_missing() {
        let html = page(&[
            card(r#"<h4 class="pull-right price">$100.00</h4><a class="title" href="/p/1">Primary</a>"#),
            card(r#"<h4 class="pull-right">$1,101.83</h4><a class="title" href="/p/2">Fallback Price</a>"#),
        ]);
        let out = LaptopsAdapter::new().extract(&html, &page_url());
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[1].name(), "Fallback Price");
        assert_eq!(out.records[1].price(), 1101.83);
        assert_eq!(out.drops.dropped(), 0);
    }

    #[test]
    fn fallback_title_is_first_link() {
        let html = page(&[card(r#"<h4 class="price">$50</h4><p><a href="/p/9">Plain Link</a><a href="/p/10">Other</a></p>"#)]);
        let out = LaptopsAdapter::new().extract(&html, &page_url());
        assert_eq!(out.records[0].name(), "Plain Link");
        assert_eq!(out.records[0].url().as_str(), "https://webscraper.io/p/9");
    }

    #[test]
    fn card_missing_both_tiers_is_dropped() {
        let html = page(&[
            card(r#"<a class="title" href="/p/1">No Price</a>"#),
            card(r#"<h4 class="price">$10</h4><span>no link</span>"#),
            card(r#"<h4 class="price">Call us</h4><a class="title" href="/p/3">Call</a>"#),
            card(r#"<h4 class="price">$20</h4><a class="title" href="/p/4">Ok</a>"#),
        ]);
        let out = LaptopsAdapter::new().extract(&html, &page_url());
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].name(), "Ok");
        assert_eq!(out.drops.missing_price, 1);
        assert_eq!(out.drops.missing_title, 1);
        assert_eq!(out.drops.unparseable_price, 1);
        assert_eq!(out.drops.seen, 4);
    }

    #[test]
    fn no_cards_yields_empty() {
        let out = LaptopsAdapter::new().extract("<html><body></body></html>", &page_url());
        assert!(out.records.is_empty());
        assert_eq!(out.drops, Default::default());
    }
}
