use chrono::{DateTime, SecondsFormat, Utc};

// Batch timestamp written to the `scraped_at` column, e.g. "2024-05-01T12:30:00Z".
pub fn format_scraped_at(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn seconds_precision_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(format_scraped_at(ts), "2024-05-01T12:30:00Z");
    }
}
