//! System browser adapter.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::port::BrowserLauncher;

/// Opens URLs with the platform's default handler.
#[derive(Debug, Default)]
pub struct SystemBrowser;

#[async_trait]
impl BrowserLauncher for SystemBrowser {
    async fn open(&self, url: &Url) -> Result<()> {
        debug!(%url, "opening browser");
        let target = url.to_string();
        tokio::task::spawn_blocking(move || open::that(target))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))??;
        Ok(())
    }
}
