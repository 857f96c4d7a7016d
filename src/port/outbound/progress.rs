//! Progress feedback port.

use async_trait::async_trait;

/// Starts a progress display that runs until its handle is stopped.
pub trait ProgressReporter: Send + Sync {
    /// Start displaying `message`. Returns immediately.
    fn start(&self, message: &str) -> Box<dyn ProgressHandle>;
}

/// Handle to a running progress display.
#[async_trait]
pub trait ProgressHandle: Send {
    /// Halt the display. Once this returns nothing more is written.
    async fn stop(self: Box<Self>);
}
