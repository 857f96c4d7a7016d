//! Infrastructure configuration modules.

pub mod compose;
pub mod logging;
pub mod paths;
pub mod settings;
pub mod ui;

pub use settings::Config;
