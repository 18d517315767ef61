use crate::metrics::LatencyStats;

use super::runner::RunReport;

const RULE: &str = "======================";

/// Renders the end-of-run report. Latency lines are left out when nothing
/// completed.
#[must_use]
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let summary = &report.summary;
    let mut lines = vec![
        RULE.to_owned(),
        "RUN SUMMARY".to_owned(),
        format!("Target: {}", report.target),
        format!("Total requests: {}", summary.total_requests),
        format!("Issued requests: {}", report.issued),
        format!("Total elapsed time: {:?}", report.elapsed),
    ];
    if report.truncated {
        lines.push("Run truncated: some requests were still in flight when it stopped.".to_owned());
    }

    lines.push("Response codes received (count)".to_owned());
    for (status, count) in &summary.status_counts {
        lines.push(format!("    {}: {}", status, count));
    }

    if let Some(latency) = summary.latency {
        push_latency_lines(&mut lines, &latency);
    }
    lines.push(RULE.to_owned());
    lines
}

fn push_latency_lines(lines: &mut Vec<String>, latency: &LatencyStats) {
    lines.push("Latencies observed in milliseconds".to_owned());
    lines.push(format!("    Average: {}", latency.avg_ms));
    lines.push(format!("    99th percentile: {}", latency.p99_ms));
    lines.push(format!("    95th percentile: {}", latency.p95_ms));
    lines.push(format!("    75th percentile: {}", latency.p75_ms));
    lines.push(format!("    50th percentile: {}", latency.p50_ms));
    lines.push(format!("Slowest request: {}", latency.max_ms));
    lines.push(format!("Fastest request: {}", latency.min_ms));
}

pub fn print_summary(report: &RunReport) {
    for line in summary_lines(report) {
        println!("{}", line);
    }
}
