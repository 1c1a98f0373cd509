use std::io::{self, Write};

use super::config::OutputConfig;
use super::types::Envelope;

/// Writes result envelopes as one JSON document per line (or pretty-printed).
pub struct Emitter {
    pretty: bool,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self { Emitter { pretty: cfg.pretty } }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.write_to(env, &mut out)?;
        out.flush()
    }

    pub fn write_to(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(io::Error::other)?; }
        else { serde_json::to_writer(&mut *w, env).map_err(io::Error::other)?; }
        writeln!(w)
    }
}
