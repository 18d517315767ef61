use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use super::types::{Outcome, OutcomeSet};

/// Producer handle for the run's outcome set. Cheap to clone; one per task.
#[derive(Debug, Clone)]
pub struct OutcomeSink {
    tx: mpsc::UnboundedSender<Outcome>,
}

impl OutcomeSink {
    /// Delivers one outcome. Returns false once the collector is gone.
    #[must_use]
    pub fn record(&self, outcome: Outcome) -> bool {
        self.tx.send(outcome).is_ok()
    }
}

/// Single consumer that owns the outcome set while the run is in progress.
///
/// Appends happen only inside the consumer task, so producers never hold a
/// lock and the network calls feeding it stay fully parallel.
#[derive(Debug)]
pub struct ResultCollector {
    handle: JoinHandle<OutcomeSet>,
}

impl ResultCollector {
    /// Starts the consumer task and returns it with the first sink.
    #[must_use]
    pub fn spawn() -> (Self, OutcomeSink) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
        let handle = tokio::spawn(async move {
            let mut outcomes = OutcomeSet::new();
            while let Some(outcome) = rx.recv().await {
                outcomes.push(outcome);
            }
            outcomes
        });
        (Self { handle }, OutcomeSink { tx })
    }

    /// Waits until every sink is dropped and hands back the outcome set.
    ///
    /// # Errors
    ///
    /// Returns an error if the consumer task panicked or was aborted.
    pub async fn finish(self) -> Result<OutcomeSet, JoinError> {
        self.handle.await
    }
}
