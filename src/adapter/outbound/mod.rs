//! Outbound adapters (driven side).

pub mod browser;
pub mod compose;
pub mod http;
pub mod indicator;
pub mod store;
