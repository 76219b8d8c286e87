//! Configuration loading and environment variable handling

use crate::domains::SyncscopeConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "SYNCSCOPE".to_string(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<SyncscopeConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: SyncscopeConfig = serde_yaml::from_str(&content)?;

        // Apply environment variable overrides
        self.apply_env_overrides(&mut config)?;

        // Validate all domains
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<SyncscopeConfig> {
        let mut config = SyncscopeConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<SyncscopeConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut SyncscopeConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_logging_overrides(&mut config.logging)?;
        self.apply_service_overrides(&mut config.service)?;
        self.apply_journal_overrides(&mut config.journal)?;

        if let Ok(path) = self.get_env_var("REPOSITORY_LIST") {
            config.registry.list_path = PathBuf::from(path);
        }

        if let Ok(interval) = self.get_env_var("POLL_INTERVAL") {
            let seconds: u64 = interval
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid POLL_INTERVAL: {}", e)))?;
            config.broadcast.poll_interval = std::time::Duration::from_secs(seconds);
        }

        Ok(())
    }

    /// Apply server config overrides
    fn apply_server_overrides(&self, config: &mut crate::domains::server::ServerConfig) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = port
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid SERVER_PORT: {}", e)))?;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(&self, config: &mut crate::domains::logging::LoggingConfig) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = log_level
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = format
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    fn apply_service_overrides(&self, config: &mut crate::domains::service::ServiceConfig) -> ConfigResult<()> {
        if let Ok(unit) = self.get_env_var("SERVICE_UNIT") {
            config.unit = unit;
        }
        Ok(())
    }

    fn apply_journal_overrides(&self, config: &mut crate::domains::journal::JournalConfig) -> ConfigResult<()> {
        if let Ok(use_sudo) = self.get_env_var("JOURNAL_USE_SUDO") {
            config.use_sudo = use_sudo
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid JOURNAL_USE_SUDO: {}", e)))?;
        }

        if let Ok(timeout) = self.get_env_var("JOURNAL_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid JOURNAL_TIMEOUT: {}", e)))?;
            config.timeout = std::time::Duration::from_secs(seconds);
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
