//! Route CLI - Command line tools for the route drawing core.
//!
//! The `route_session` binary replays a scripted drawing session through
//! the controller and prints the resulting mission.

pub mod config;
pub mod output;
pub mod script;

pub use config::{Config, LogFormat};
pub use output::{render, OutputFormat};
pub use script::{load_script, replay, ReplayReport, ScriptEvent};
