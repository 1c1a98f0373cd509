pub mod collect;
pub mod stats;
