//! Syncscope server
//!
//! Wires configuration, logging, the systemd adapters and the dashboard API
//! into one process.

pub mod cli;
pub mod services;
pub mod startup;

// Re-export main components
pub use cli::{apply_cli_overrides, Cli};
pub use services::*;
pub use startup::*;
