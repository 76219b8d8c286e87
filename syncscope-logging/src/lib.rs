//! Tracing subscriber setup for syncscope
//!
//! Console output follows the configured format. An optional daily-rotated
//! file sink is written through a non-blocking worker whose guard must be
//! held for the lifetime of the process.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, LoggingGuard};
