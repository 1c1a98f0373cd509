use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Collect;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Site, FetchPage, Extract, Persist }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Site => "site",
        Phase::FetchPage => "fetch_page",
        Phase::Extract => "extract",
        Phase::Persist => "persist",
    }}
    fn span(&self) -> Span { match self {
        Phase::Site => info_span!("site"),
        Phase::FetchPage => info_span!("fetch_page"),
        Phase::Extract => info_span!("extract"),
        Phase::Persist => info_span!("persist"),
    }}
}

impl OpMarker for Collect {
    const NAME: &'static str = "collect";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("collect") }
}
