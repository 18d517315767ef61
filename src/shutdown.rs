//! Run-wide stop signal shared by the scheduler and the signal handler.
use tokio::sync::broadcast;

/// Broadcasts a stop request to every subscriber of the run.
pub type ShutdownSender = broadcast::Sender<()>;
/// Resolves once a stop was requested.
pub type ShutdownReceiver = broadcast::Receiver<()>;
