//! Domain-specific configuration modules

pub mod broadcast;
pub mod classifier;
pub mod journal;
pub mod logging;
pub mod registry;
pub mod server;
pub mod service;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main syncscope configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyncscopeConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: server::ServerConfig,

    /// journalctl invocation settings
    #[serde(default)]
    pub journal: journal::JournalConfig,

    /// Monitored systemd unit and systemctl settings
    #[serde(default)]
    pub service: service::ServiceConfig,

    /// Repository list location
    #[serde(default)]
    pub registry: registry::RegistryConfig,

    /// Live status polling
    #[serde(default)]
    pub broadcast: broadcast::BroadcastConfig,

    /// Log line classification
    #[serde(default)]
    pub classifier: classifier::ClassifierConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl SyncscopeConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.journal.validate()?;
        self.service.validate()?;
        self.registry.validate()?;
        self.broadcast.validate()?;
        self.classifier.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = SyncscopeConfig::default();
        serde_yaml::to_string(&config).unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
