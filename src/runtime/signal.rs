//! One-shot stop signal shared between a controlling task and a worker.
//!
//! Built on `tokio::sync::watch` the same way the runtime shutdown flag is:
//! the flag starts `false`, flips to `true` once, and a dropped sender counts
//! as stopped so a worker never outlives its controller by waiting forever.

use tokio::sync::watch;

/// Create a connected sender/listener pair.
#[must_use]
pub fn stop_channel() -> (StopSender, StopListener) {
    let (tx, rx) = watch::channel(false);
    (StopSender(tx), StopListener(rx))
}

/// Controlling side of a stop signal.
#[derive(Debug)]
pub struct StopSender(watch::Sender<bool>);

impl StopSender {
    /// Ask every listener to stop. Repeated calls are no-ops.
    pub fn stop(&self) {
        self.0.send_replace(true);
    }
}

/// Worker side of a stop signal.
#[derive(Debug, Clone)]
pub struct StopListener(watch::Receiver<bool>);

impl StopListener {
    /// True once stop was requested or the sender went away.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        *self.0.borrow() || self.0.has_changed().is_err()
    }

    /// Resolve once stop is requested or the sender is dropped.
    pub async fn stopped(&mut self) {
        let _ = self.0.wait_for(|stop| *stop).await;
    }
}
