use std::fmt;

use serde::Serialize;
use url::Url;

/// Which adapter produced a record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Books,
    Laptops,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Books => "books",
            Source::Laptops => "laptops",
        }
    }

    /// Every source lists prices in exactly one currency.
    pub fn currency(&self) -> Currency {
        match self {
            Source::Books => Currency::Gbp,
            Source::Laptops => Currency::Usd,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Gbp,
    Usd,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Gbp => "GBP",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One normalized product listing. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductRecord {
    name: String,
    price: f64,
    currency: Currency,
    source: Source,
    url: Url,
}

impl ProductRecord {
    /// Returns `None` when the name is blank or the price is negative/non-finite.
    /// Currency always follows the source.
    pub fn new(name: &str, price: f64, source: Source, url: Url) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() || !price.is_finite() || price < 0.0 { return None; }
        Some(ProductRecord { name: name.to_string(), price, currency: source.currency(), source, url })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn price(&self) -> f64 { self.price }
    pub fn currency(&self) -> Currency { self.currency }
    pub fn source(&self) -> Source { self.source }
    pub fn url(&self) -> &Url { &self.url }
}
