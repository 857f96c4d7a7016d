//! Browser port.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Open `url` in the user's default browser.
    async fn open(&self, url: &Url) -> Result<()>;
}
