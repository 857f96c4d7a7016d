//! Remote file download port.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download the body at `url` as text.
    async fn fetch(&self, url: &Url) -> Result<String>;
}
