//! Outcome collection and post-run latency/status aggregation.
mod collector;
mod summary;
mod types;


pub use collector::{OutcomeSink, ResultCollector};
pub use summary::{REPORTED_PERCENTILES, percentile_index, summarize};
pub use types::{LatencyStats, Outcome, OutcomeSet, RunSummary};
