//! Domain-driven configuration management for syncscope
//!
//! This crate provides modular configuration split by functional domains,
//! with validation, defaults, and environment variable support.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    broadcast::BroadcastConfig,
    classifier::{ClassifierConfig, UnmatchedOperationSetting},
    journal::JournalConfig,
    logging::LoggingConfig,
    registry::RegistryConfig,
    server::{CorsConfig, ServerConfig},
    service::ServiceConfig,
    SyncscopeConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
