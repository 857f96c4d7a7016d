//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! through ports to implement the sandbox commands.

pub mod readiness;
pub mod sandbox;

pub use readiness::ReadinessOrchestrator;
pub use sandbox::{OpenedUi, PreparedWorkdir, Sandbox, SandboxSettings};
