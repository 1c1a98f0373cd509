pub mod config;
pub mod ctx;
pub mod ops;
pub mod sink;

use ctx::LogCtx;

// One typed context per command
pub fn collect() -> LogCtx<ops::collect::Collect> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn stats() -> LogCtx<ops::stats::Stats> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
