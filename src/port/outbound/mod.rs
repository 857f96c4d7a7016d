//! Outbound ports: what the application needs from the outside world.

pub mod browser;
pub mod compose;
pub mod fetch;
pub mod progress;
pub mod readiness;
pub mod store;

pub use browser::BrowserLauncher;
pub use compose::ComposeRunner;
pub use fetch::Fetcher;
pub use progress::{ProgressHandle, ProgressReporter};
pub use readiness::{EndpointResolver, ReadinessProbe};
pub use store::{ComposeFiles, Workdirs};
