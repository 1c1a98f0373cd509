use scraper::{ElementRef, Selector};
use url::Url;

/// Ordered selectors for one field; the first that matches inside the container wins.
pub struct FieldStrategy {
    tiers: Vec<Selector>,
}

impl FieldStrategy {
    pub fn new(selectors: &[&str]) -> Self {
        let tiers = selectors.iter().map(|s| selector(s)).collect();
        FieldStrategy { tiers }
    }

    pub fn locate<'a>(&self, container: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.tiers.iter().find_map(|sel| container.select(sel).next())
    }
}

/// Selectors in this crate are literals; an invalid one is a programming error.
pub fn selector(s: &str) -> Selector {
    Selector::parse(s).unwrap_or_else(|e| panic!("invalid selector {s:?}: {e:?}"))
}

pub fn visible_text(el: ElementRef<'_>) -> String {
    let text = el.text().collect::<String>();
    collapse_whitespace(&text)
}

/// Resolve an href against the page it came from. Absolute hrefs come back unchanged,
/// an empty href resolves to the page itself.
pub fn resolve(page_url: &Url, href: &str) -> Option<Url> {
    page_url.join(href.trim()).ok()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn first_matching_tier_wins() {
        let doc = Html::parse_fragment(r#"<div class="card"><span class="b">second</span><span class="a">first</span></div>"#);
        let card = doc.select(&selector("div.card")).next().unwrap();
        let strat = FieldStrategy::new(&["span.a", "span.b"]);
        assert_eq!(visible_text(strat.locate(card).unwrap()), "first");
        let strat = FieldStrategy::new(&["span.missing", "span.b"]);
        assert_eq!(visible_text(strat.locate(card).unwrap()), "second");
        let strat = FieldStrategy::new(&["em", "strong"]);
        assert!(strat.locate(card).is_none());
    }

    #[test]
    fn resolve_relative_and_absolute() {
        let page = Url::parse("https://books.toscrape.com/catalogue/page-2.html").unwrap();
        assert_eq!(resolve(&page, "page-3.html").unwrap().as_str(), "https://books.toscrape.com/catalogue/page-3.html");
        assert_eq!(resolve(&page, "../index.html").unwrap().as_str(), "https://books.toscrape.com/index.html");
        assert_eq!(resolve(&page, "https://example.com/x").unwrap().as_str(), "https://example.com/x");
        assert_eq!(resolve(&page, "").unwrap(), page);
    }

    #[test]
    fn visible_text_collapses_whitespace() {
        let doc = Html::parse_fragment("<p>  Asus \n  VivoBook <b>X441</b> </p>");
        let p = doc.select(&selector("p")).next().unwrap();
        assert_eq!(visible_text(p), "Asus VivoBook X441");
    }
}
