//! Handler for the `web` command.

use url::Url;

use super::output;
use crate::application::{OpenedUi, Sandbox};
use crate::error::Result;

/// Execute the web command.
pub async fn execute(sandbox: &Sandbox) -> Result<()> {
    let opened = sandbox.web().await?;
    report_opened(&opened);
    Ok(())
}

/// Tell the user where the UI is, and how to reach it if no browser opened.
pub(super) fn report_opened(opened: &OpenedUi) {
    let shown = shown_url(&opened.url);
    output::success(&format!("UI available at {}", output::highlight(&shown)));

    if let Some(e) = &opened.browser_error {
        output::warning(&format!("could not open the browser: {e}"));
        output::hint(&format!("open {shown} manually"));
    }
}

/// The URL as users type it: a bare root path is left off.
fn shown_url(url: &Url) -> String {
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        url.origin().ascii_serialization()
    } else {
        url.to_string()
    }
}
