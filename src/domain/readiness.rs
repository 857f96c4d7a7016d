//! Readiness wait values: the request, its retry policy, and the outcome.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ReadinessError;

/// Fixed-interval retry policy used by the resolve and probe loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause between two failed attempts.
    pub interval: Duration,
    /// Attempts allowed per phase. `None` retries until the deadline.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

    /// Retry forever at `interval`.
    #[must_use]
    pub const fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// True once `attempts` has used up the budget.
    #[must_use]
    pub fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(Self::DEFAULT_INTERVAL)
    }
}

/// One invocation's worth of "wait until this service answers".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessRequest {
    service: String,
    port: u16,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ReadinessRequest {
    #[must_use]
    pub fn new(service: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            service: service.into(),
            port,
            timeout,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}

/// States of a readiness wait, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    Starting,
    ResolvingEndpoint,
    ProbingReadiness,
    Ready,
    TimedOut,
    Failed,
}

impl fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Starting => "starting",
            Self::ResolvingEndpoint => "resolving_endpoint",
            Self::ProbingReadiness => "probing_readiness",
            Self::Ready => "ready",
            Self::TimedOut => "timed_out",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Terminal result of one readiness wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestrationOutcome {
    /// The service answered at this URL.
    Ready(Url),
    /// The deadline passed first.
    TimedOut,
    /// The wait could not continue (e.g. an unusable address).
    Failed(ReadinessError),
}

impl OrchestrationOutcome {
    #[must_use]
    pub fn state(&self) -> ReadinessState {
        match self {
            Self::Ready(_) => ReadinessState::Ready,
            Self::TimedOut => ReadinessState::TimedOut,
            Self::Failed(_) => ReadinessState::Failed,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Format a duration the way people write it: `2s`, `1m0s`, `1m30s`, `500ms`.
#[must_use]
pub fn human_duration(duration: &Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs == 0 {
        return format!("{millis}ms");
    }

    let frac = if millis == 0 {
        String::new()
    } else {
        format!(".{millis:03}").trim_end_matches('0').to_string()
    };

    if secs < 60 {
        format!("{secs}{frac}s")
    } else if secs < 3600 {
        format!("{}m{}{frac}s", secs / 60, secs % 60)
    } else {
        format!("{}h{}m{}{frac}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
