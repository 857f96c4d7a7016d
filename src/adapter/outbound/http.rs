//! HTTP adapters: the readiness probe and the compose file fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{trace, warn};
use url::Url;

use crate::error::{ComposeError, Result};
use crate::port::{Fetcher, ReadinessProbe};

fn client_with_timeout(timeout: Duration) -> HttpClient {
    build_client(HttpClient::builder().timeout(timeout))
}

fn build_client(builder: reqwest::ClientBuilder) -> HttpClient {
    builder
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        })
}

/// Issues one GET per probe. Any HTTP response counts as ready.
/// Requests always connect directly, ignoring proxy settings.
pub struct HttpProbe {
    http: HttpClient,
}

impl HttpProbe {
    /// Create a probe whose requests give up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: build_client(HttpClient::builder().timeout(timeout).no_proxy()),
        }
    }
}

#[async_trait]
impl ReadinessProbe for HttpProbe {
    async fn probe(&self, url: &Url) -> Result<()> {
        let response = self.http.get(url.clone()).send().await?;
        trace!(%url, status = %response.status(), "probe answered");
        Ok(())
    }
}

/// Downloads compose files over HTTP(S).
pub struct HttpFetcher {
    http: HttpClient,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: client_with_timeout(timeout),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let download_error = |reason: String| ComposeError::Download {
            url: url.to_string(),
            reason,
        };

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(download_error(status.to_string()).into());
        }

        Ok(response
            .text()
            .await
            .map_err(|e| download_error(e.to_string()))?)
    }
}
