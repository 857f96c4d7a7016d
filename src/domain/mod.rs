//! Orchestrator-agnostic domain types.

pub mod compose;
pub mod endpoint;
pub mod readiness;

pub use compose::ComposeFileEntry;
pub use endpoint::{ConnectAddress, Endpoint};
pub use readiness::{OrchestrationOutcome, ReadinessRequest, ReadinessState, RetryPolicy};
