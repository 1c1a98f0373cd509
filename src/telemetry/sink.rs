use std::sync::{Arc, Mutex, OnceLock};

use anyhow::Result;

use crate::output::config::OutputConfig;
use crate::output::Emitter;
use crate::output::types::Envelope;

pub trait OutputSink: Send + Sync {
    fn on_result(&self, env: &Envelope) -> Result<()>;
}

#[derive(Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn on_result(&self, env: &Envelope) -> Result<()> {
        let emitter = Emitter::new(OutputConfig::from_env());
        emitter.emit(env).map_err(anyhow::Error::from)
    }
}

type DynSink = Arc<dyn OutputSink>;

fn sink_slot() -> &'static Mutex<DynSink> {
    static SINK: OnceLock<Mutex<DynSink>> = OnceLock::new();
    SINK.get_or_init(|| Mutex::new(Arc::new(StdoutSink) as DynSink))
}

pub fn current_sink() -> DynSink {
    sink_slot().lock().expect("sink mutex poisoned").clone()
}

/// Restores the previous sink on drop.
pub struct SinkGuard {
    previous: DynSink,
}

pub fn install_sink(new_sink: DynSink) -> SinkGuard {
    let mut guard = sink_slot().lock().expect("sink mutex poisoned");
    let previous = std::mem::replace(&mut *guard, new_sink);
    SinkGuard { previous }
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        let mut guard = sink_slot().lock().expect("sink mutex poisoned");
        *guard = self.previous.clone();
    }
}
