//! Readiness polling ports.
//!
//! Both ports answer a single question once. Failures are expected while the
//! service is still starting; retrying is the caller's job.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

/// Looks up the published address of a service's container port.
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    /// Return the raw bind address (e.g. `0.0.0.0:8088`), or an error while
    /// the service is not yet available.
    async fn resolve(&self, service: &str, port: u16) -> Result<String>;
}

/// Checks whether something is listening and speaking HTTP at a URL.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Succeed on any response, whatever its status code.
    async fn probe(&self, url: &Url) -> Result<()>;
}
