use std::collections::BTreeMap;

use super::types::{LatencyStats, OutcomeSet, RunSummary};

/// Percentiles included in every summary.
pub const REPORTED_PERCENTILES: [u64; 4] = [50, 75, 95, 99];

const PERCENT_DIVISOR: usize = 100;

/// Index of the `percentile` value in an ascending slice of `len` items.
///
/// Nearest-rank style: `floor(len * p / 100)`, stepped back by one when
/// there is more than one item. `None` for an empty slice.
#[must_use]
pub fn percentile_index(len: usize, percentile: u64) -> Option<usize> {
    let last = len.checked_sub(1)?;
    let percentile = usize::try_from(percentile).unwrap_or(usize::MAX);
    let raw = len
        .saturating_mul(percentile)
        .checked_div(PERCENT_DIVISOR)
        .unwrap_or(0);
    let index = if len > 1 { raw.saturating_sub(1) } else { raw };
    Some(index.min(last))
}

fn percentile(sorted: &[u64], percentile: u64) -> u64 {
    percentile_index(sorted.len(), percentile)
        .and_then(|index| sorted.get(index))
        .copied()
        .unwrap_or(0)
}

/// Reduces the finished outcome set to a run summary.
#[must_use]
pub fn summarize(outcomes: OutcomeSet) -> RunSummary {
    let mut status_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut latencies: Vec<u64> = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        latencies.push(outcome.latency_ms);
        let count = status_counts.entry(outcome.status).or_insert(0);
        *count = count.saturating_add(1);
    }
    latencies.sort_unstable();

    let total_requests = u64::try_from(latencies.len()).unwrap_or(u64::MAX);
    RunSummary {
        total_requests,
        latency: latency_stats(&latencies),
        status_counts,
    }
}

fn latency_stats(sorted: &[u64]) -> Option<LatencyStats> {
    let (&min_ms, &max_ms) = (sorted.first()?, sorted.last()?);
    let sum: u128 = sorted.iter().map(|&value| u128::from(value)).sum();
    let count = u128::try_from(sorted.len()).unwrap_or(u128::MAX);
    let avg = sum.checked_div(count).unwrap_or(0);

    let [p50, p75, p95, p99] = REPORTED_PERCENTILES.map(|p| percentile(sorted, p));
    Some(LatencyStats {
        p50_ms: p50,
        p75_ms: p75,
        p95_ms: p95,
        p99_ms: p99,
        min_ms,
        max_ms,
        avg_ms: u64::try_from(avg).unwrap_or(u64::MAX),
    })
}
