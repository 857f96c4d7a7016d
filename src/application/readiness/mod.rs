//! Readiness orchestration.
//!
//! Waits for a service started by the orchestrator to become reachable:
//!
//! 1. Ask the [`EndpointResolver`] for the published address until it has one.
//! 2. Rewrite a wildcard bind address to loopback and build the URL.
//! 3. Ask the [`ReadinessProbe`] until something answers at that URL.
//!
//! Steps 1-3 run in a spawned task that races a deadline. When the deadline
//! wins, the task is told to stop at its next attempt or pause instead of
//! being left to poll in the background. Long waits get a progress
//! indicator, stopped on every exit path.

mod poll;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use crate::domain::{OrchestrationOutcome, ReadinessRequest, ReadinessState};
use crate::error::ReadinessError;
use crate::port::{EndpointResolver, ProgressReporter, ReadinessProbe};
use crate::runtime::stop_channel;

/// Composes endpoint resolution and readiness probing into one bounded wait.
pub struct ReadinessOrchestrator {
    resolver: Arc<dyn EndpointResolver>,
    probe: Arc<dyn ReadinessProbe>,
    progress: Arc<dyn ProgressReporter>,
    indicator_threshold: Duration,
    message: String,
}

impl ReadinessOrchestrator {
    /// Waits longer than this get a progress indicator.
    pub const DEFAULT_INDICATOR_THRESHOLD: Duration = Duration::from_secs(5);
    pub const DEFAULT_MESSAGE: &'static str = "Initializing source{d}...";

    pub fn new(
        resolver: Arc<dyn EndpointResolver>,
        probe: Arc<dyn ReadinessProbe>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            resolver,
            probe,
            progress,
            indicator_threshold: Self::DEFAULT_INDICATOR_THRESHOLD,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn with_indicator_threshold(mut self, threshold: Duration) -> Self {
        self.indicator_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Whether a wait bounded by `timeout` shows the progress indicator.
    #[must_use]
    pub fn shows_indicator(&self, timeout: Duration) -> bool {
        timeout > self.indicator_threshold
    }

    /// Wait until the requested service answers or `request.timeout()` passes.
    ///
    /// Produces exactly one outcome. Resolve and probe failures are retried,
    /// never returned; only the deadline ([`OrchestrationOutcome::TimedOut`])
    /// or an unusable address ([`OrchestrationOutcome::Failed`]) end the wait
    /// early.
    pub async fn wait(&self, request: ReadinessRequest) -> OrchestrationOutcome {
        let timeout = request.timeout();
        info!(
            state = %ReadinessState::Starting,
            service = request.service(),
            port = request.port(),
            timeout_ms = timeout.as_millis() as u64,
            "waiting for service"
        );

        let indicator = self
            .shows_indicator(timeout)
            .then(|| self.progress.start(&self.message));

        let (stop_tx, stop_rx) = stop_channel();
        let mut polling = tokio::spawn(poll::wait_until_ready(
            Arc::clone(&self.resolver),
            Arc::clone(&self.probe),
            request,
            stop_rx,
        ));

        let outcome = tokio::select! {
            joined = &mut polling => match joined {
                Ok(Ok(url)) => OrchestrationOutcome::Ready(url),
                Ok(Err(ReadinessError::AttemptsExhausted { phase, attempts })) => {
                    debug!(phase, attempts, "retry budget exhausted");
                    OrchestrationOutcome::TimedOut
                }
                Ok(Err(e)) => OrchestrationOutcome::Failed(e),
                Err(e) => OrchestrationOutcome::Failed(ReadinessError::Task(e.to_string())),
            },
            () = sleep(timeout) => {
                stop_tx.stop();
                OrchestrationOutcome::TimedOut
            }
        };

        if let Some(indicator) = indicator {
            indicator.stop().await;
        }

        // Callers report failures to the user.
        match &outcome {
            OrchestrationOutcome::Ready(url) => {
                info!(state = %outcome.state(), %url, "service ready");
            }
            OrchestrationOutcome::TimedOut => info!(
                state = %outcome.state(),
                timeout_ms = timeout.as_millis() as u64,
                "service did not become reachable"
            ),
            OrchestrationOutcome::Failed(e) => {
                info!(state = %outcome.state(), error = %e, "readiness wait failed");
            }
        }

        outcome
    }
}
