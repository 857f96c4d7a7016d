//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the readiness core and the outside world:
//! the orchestrator process, the network, the terminal, and the browser.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Compose │            │    HTTP     │              │ Terminal  │
//! │ Adapter │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ComposeRunner`] - Runs the container orchestrator executable
//! - [`EndpointResolver`], [`ReadinessProbe`] - Readiness polling
//! - [`ProgressReporter`], [`ProgressHandle`] - Live progress feedback
//! - [`BrowserLauncher`] - Opens URLs for the user
//! - [`Fetcher`] - Downloads remote files
//! - [`ComposeFiles`], [`Workdirs`] - Persisted sandbox state

pub mod outbound;

pub use outbound::{
    BrowserLauncher, ComposeFiles, ComposeRunner, EndpointResolver, Fetcher, ProgressHandle,
    ProgressReporter, ReadinessProbe, Workdirs,
};
