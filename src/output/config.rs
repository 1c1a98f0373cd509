use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub pretty: bool,
}

impl OutputConfig {
    pub fn from_env() -> Self {
        let json = matches!(env::var("PRICES_OUTPUT_FORMAT").ok().as_deref(), Some("json"));
        let pretty = match env::var("PRICES_OUTPUT_PRETTY").ok().as_deref() {
            Some(v) if v.eq_ignore_ascii_case("1") || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") => true,
            _ => false,
        };
        OutputConfig { json, pretty }
    }
}
