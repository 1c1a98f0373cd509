use std::sync::OnceLock;

use regex::Regex;

use crate::error::UnparseablePrice;

fn noise() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    // digits and the decimal point survive; symbols, separators and labels go
    NOISE.get_or_init(|| Regex::new(r"[^0-9.]").expect("valid price regex"))
}

/// Pull a numeric price out of display text such as `£51.77` or `$1,299.00`.
pub fn normalize(raw: &str) -> Result<f64, UnparseablePrice> {
    let cleaned = noise().replace_all(raw, "");
    if cleaned.is_empty() {
        return Err(UnparseablePrice::new(raw));
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(UnparseablePrice::new(raw)),
    }
}
