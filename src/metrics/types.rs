use std::collections::BTreeMap;
use std::time::Duration;

/// Status and latency of one completed HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: String,
    pub latency_ms: u64,
}

impl Outcome {
    /// Builds an outcome, truncating the latency to whole milliseconds.
    #[must_use]
    pub fn new(status: impl Into<String>, latency: Duration) -> Self {
        Self {
            status: status.into(),
            latency_ms: u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Every outcome delivered during a run, in arrival order.
pub type OutcomeSet = Vec<Outcome>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub p50_ms: u64,
    pub p75_ms: u64,
    pub p95_ms: u64,
    pub p99_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub avg_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_requests: u64,
    /// `None` when no request completed.
    pub latency: Option<LatencyStats>,
    pub status_counts: BTreeMap<String, u64>,
}
