use std::time::Duration;

use reqwest::Url;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{
    error::AppResult,
    http::{self, LoadPlan, RateScheduler, RequestTemplate, RunConfig},
    metrics::{self, ResultCollector, RunSummary},
    shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel},
};

/// Result of one run, ready for printing.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub issued: u64,
    pub elapsed: Duration,
    /// Set when the join barrier gave up before every request finished.
    pub truncated: bool,
    pub target: Url,
}

/// Executes `config` against its target and summarizes what came back.
///
/// # Errors
///
/// Returns an error when the client or request template cannot be built,
/// or the result collector dies.
pub async fn run_local(config: RunConfig) -> AppResult<RunReport> {
    let client = http::build_client(&config.client)?;
    let template = RequestTemplate::new(config.target.clone(), &config.headers, config.body)?;

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let (collector, sink) = ResultCollector::spawn();

    announce(&config.plan, &config.target);
    let run_start = Instant::now();
    let scheduler = RateScheduler::new(client, template, sink, config.verbose);
    let schedule = scheduler
        .run(config.plan, config.deadline, &mut shutdown_rx)
        .await;
    let outcomes = collector.finish().await?;
    let elapsed = run_start.elapsed();

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        debug!("Signal handler ended abnormally: {}", err);
    }

    debug!(
        "Scheduler issued {} and completed {} requests, collected {} outcomes.",
        schedule.issued,
        schedule.completed,
        outcomes.len()
    );

    Ok(RunReport {
        summary: metrics::summarize(outcomes),
        issued: schedule.issued,
        elapsed,
        truncated: schedule.truncated,
        target: config.target,
    })
}

fn announce(plan: &LoadPlan, target: &Url) {
    match *plan {
        LoadPlan::Ticks {
            ticks,
            per_tick,
            interval,
        } => info!(
            "Will send {} requests every {:?} for {} ticks ({} in total) to {}",
            per_tick,
            interval,
            ticks,
            plan.planned_requests(),
            target
        ),
        LoadPlan::Count { total } => info!("Will send {} requests to {}", total, target),
    }
}
