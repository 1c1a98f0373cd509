use std::sync::OnceLock;

use crate::output::config::OutputConfig;

static JSON_FLAG: OnceLock<bool> = OnceLock::new();

/// Record the global `--json` flag. First call wins.
pub fn set_json_mode(v: bool) {
    let _ = JSON_FLAG.set(v);
}

/// Result envelopes go to stdout when `--json` is given or `PRICES_OUTPUT_FORMAT=json`.
pub fn json_mode() -> bool {
    *JSON_FLAG.get().unwrap_or(&false) || OutputConfig::from_env().json
}

pub fn logs_are_json() -> bool {
    matches!(std::env::var("PRICES_LOG_FORMAT").as_deref(), Ok("json"))
}

/// Initialize tracing/logging according to RUST_LOG and PRICES_LOG_FORMAT.
/// - Defaults to `info` if `RUST_LOG` is unset
/// - Supports `PRICES_LOG_FORMAT=json` for JSON logs
/// - Always writes to stderr so stdout stays reserved for result envelopes
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    use tracing_subscriber::prelude::*; // for .with()

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    if logs_are_json() {
        let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
    } else {
        let _ = builder.with(fmt_layer.compact()).try_init();
    }
}
