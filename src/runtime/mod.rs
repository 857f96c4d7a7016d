//! Task coordination primitives shared by the readiness core and its
//! terminal indicator.

pub mod signal;

pub use signal::{stop_channel, StopListener, StopSender};
