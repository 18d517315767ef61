use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{Instant, sleep_until};
use tracing::{error, info, warn};

use crate::{metrics::OutcomeSink, shutdown::ShutdownReceiver};

use super::config::LoadPlan;
use super::executor::{RequestTemplate, execute_request};
use super::rate::TickSchedule;

/// What the scheduler did, as seen from the join barrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    /// Requests handed to an executor.
    pub issued: u64,
    /// Executors that ran to completion, with or without an outcome.
    pub completed: u64,
    /// The run stopped early on shutdown or deadline.
    pub truncated: bool,
}

/// Issues load in waves and waits for every request it started.
pub struct RateScheduler {
    client: Client,
    template: Arc<RequestTemplate>,
    sink: OutcomeSink,
    verbose: bool,
}

impl RateScheduler {
    #[must_use]
    pub fn new(client: Client, template: RequestTemplate, sink: OutcomeSink, verbose: bool) -> Self {
        Self {
            client,
            template: Arc::new(template),
            sink,
            verbose,
        }
    }

    /// Runs `plan`, then blocks on the join barrier.
    ///
    /// The barrier gives up after `deadline` (measured from the end of
    /// scheduling) or on shutdown, aborting whatever is still in flight.
    /// The scheduler's own sink is released when this returns.
    pub async fn run(
        self,
        plan: LoadPlan,
        deadline: Option<Duration>,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> ScheduleReport {
        let mut tasks: JoinSet<bool> = JoinSet::new();
        let mut report = ScheduleReport::default();

        let scheduled = match plan {
            LoadPlan::Ticks {
                ticks,
                per_tick,
                interval,
            } => {
                self.run_ticks(&mut tasks, &mut report, ticks, per_tick, interval, shutdown_rx)
                    .await
            }
            LoadPlan::Count { total } => {
                self.run_count(&mut tasks, &mut report, total, shutdown_rx)
                    .await
            }
        };
        drop(self);

        if scheduled {
            join_all(&mut tasks, &mut report, deadline, shutdown_rx).await;
        } else {
            report.truncated = true;
            stop_in_flight(&mut tasks).await;
        }
        report
    }

    async fn run_ticks(
        &self,
        tasks: &mut JoinSet<bool>,
        report: &mut ScheduleReport,
        ticks: u64,
        per_tick: usize,
        interval: Duration,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> bool {
        let schedule = TickSchedule::new(Instant::now(), interval);
        let wave = u64::try_from(per_tick).unwrap_or(u64::MAX);
        for tick in 0..ticks {
            if !wait_for_tick(&schedule, tick, shutdown_rx).await {
                return false;
            }
            for _ in 0..per_tick {
                self.spawn_request(tasks);
            }
            report.issued = report.issued.saturating_add(wave);
            info!("Finished sending {}", report.issued);
        }
        // The final tick lasts a full interval like every other one.
        wait_for_tick(&schedule, ticks, shutdown_rx).await
    }

    async fn run_count(
        &self,
        tasks: &mut JoinSet<bool>,
        report: &mut ScheduleReport,
        total: u64,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> bool {
        if total == 0 {
            return true;
        }

        // Warm-up call: primes connection setup before the burst.
        report.issued = 1;
        let warmed_up = tokio::select! {
            _ = execute_request(&self.client, &self.template, &self.sink, self.verbose) => true,
            _ = shutdown_rx.recv() => false,
        };
        if !warmed_up {
            return false;
        }
        report.completed = 1;

        for _ in 1..total {
            self.spawn_request(tasks);
        }
        report.issued = total;
        info!("Finished sending {}", report.issued);
        true
    }

    fn spawn_request(&self, tasks: &mut JoinSet<bool>) {
        let client = self.client.clone();
        let template = Arc::clone(&self.template);
        let sink = self.sink.clone();
        let verbose = self.verbose;
        tasks.spawn(async move { execute_request(&client, &template, &sink, verbose).await });
    }
}

async fn wait_for_tick(
    schedule: &TickSchedule,
    tick: u64,
    shutdown_rx: &mut ShutdownReceiver,
) -> bool {
    let Some(due) = schedule.due(tick) else {
        warn!("Tick {} is out of the clock's range, stopping.", tick);
        return false;
    };
    tokio::select! {
        () = sleep_until(due) => true,
        _ = shutdown_rx.recv() => false,
    }
}

async fn join_all(
    tasks: &mut JoinSet<bool>,
    report: &mut ScheduleReport,
    deadline: Option<Duration>,
    shutdown_rx: &mut ShutdownReceiver,
) {
    let deadline = deadline.and_then(|limit| Instant::now().checked_add(limit));
    loop {
        let joined = tokio::select! {
            joined = tasks.join_next() => joined,
            () = sleep_until_deadline(deadline) => {
                warn!("Deadline reached with {} requests in flight.", tasks.len());
                break;
            }
            _ = shutdown_rx.recv() => {
                warn!("Shutdown with {} requests in flight.", tasks.len());
                break;
            }
        };
        match joined {
            Some(result) => record_join(report, result),
            None => return,
        }
    }

    report.truncated = true;
    stop_in_flight(tasks).await;
}

fn record_join(report: &mut ScheduleReport, result: Result<bool, JoinError>) {
    if let Err(err) = result
        && err.is_panic()
    {
        error!("Request task panicked: {}", err);
    }
    report.completed = report.completed.saturating_add(1);
}

async fn stop_in_flight(tasks: &mut JoinSet<bool>) {
    tasks.shutdown().await;
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
