use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceStats { pub source: String, pub count: usize, pub min: f64, pub max: f64, pub mean: f64 }

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheapRow { pub name: String, pub price: f64, pub currency: String, pub source: String, pub url: String }

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub total: usize,
    pub last_scraped_at: Option<String>,
    pub by_source: Vec<SourceStats>,
    pub cheapest: Vec<CheapRow>,
}
