use std::time::Duration;

use tokio::time::Instant;

/// Fixed tick grid anchored at the run start.
///
/// Tick `k` is due at `start + k * interval`, so time spent spawning a wave
/// never pushes later waves back.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TickSchedule {
    start: Instant,
    interval: Duration,
}

impl TickSchedule {
    pub(crate) const fn new(start: Instant, interval: Duration) -> Self {
        Self { start, interval }
    }

    /// When tick `index` is due, or `None` if that lies beyond the clock's range.
    pub(crate) fn due(&self, index: u64) -> Option<Instant> {
        self.start.checked_add(offset(self.interval, index))
    }
}

fn offset(interval: Duration, index: u64) -> Duration {
    let secs = interval.as_secs().saturating_mul(index);
    let nanos = u64::from(interval.subsec_nanos()).saturating_mul(index);
    Duration::from_secs(secs).saturating_add(Duration::from_nanos(nanos))
}
