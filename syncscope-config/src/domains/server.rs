//! HTTP server configuration

use crate::error::ConfigResult;
use crate::validation::{validate_port_range, validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prefix the JSON API is nested under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Attach an `X-Request-ID` to every request
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_request_id: bool,

    /// Emit a tracing span per request
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_tracing: bool,

    /// How long in-flight requests get after a shutdown signal
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_shutdown_timeout")]
    pub shutdown_timeout: Duration,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Whether the CORS layer is installed at all
    #[serde(default = "crate::domains::utils::default_true")]
    pub enabled: bool,

    /// Allowed origins
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: Vec<String>,

    /// Allowed methods
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,

    /// Allowed headers
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,

    /// Whether to allow credentials
    #[serde(default = "crate::domains::utils::default_false")]
    pub allow_credentials: bool,

    /// Max age for preflight requests
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_cors_max_age")]
    pub max_age: Duration,
}

impl ServerConfig {
    /// `bind_address:port`, ready for a socket address parse
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            cors: CorsConfig::default(),
            enable_request_id: true,
            enable_tracing: true,
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: default_cors_origins(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            allow_credentials: false,
            max_age: default_cors_max_age(),
        }
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        validate_port_range(self.port, "port", self.domain_name())?;

        if !self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/') {
            return Err(self.validation_error(format!(
                "api_prefix must start with '/' and not end with one, got '{}'",
                self.api_prefix
            )));
        }

        validate_positive(self.shutdown_timeout.as_secs(), "shutdown_timeout", self.domain_name())?;

        self.cors.validate()?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

impl Validatable for CorsConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.allowed_origins.is_empty() {
            return Err(self.validation_error("At least one allowed origin must be specified"));
        }

        for origin in &self.allowed_origins {
            if origin != "*" && !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(self.validation_error(format!("Invalid CORS origin: {}", origin)));
            }
        }

        // A wildcard origin cannot be combined with credentials
        if self.allow_credentials && self.allowed_origins.iter().any(|o| o == "*") {
            return Err(self.validation_error("allow_credentials cannot be used with a wildcard origin"));
        }

        let valid_methods = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];
        for method in &self.allowed_methods {
            if !valid_methods.contains(&method.as_str()) {
                return Err(self.validation_error(format!("Invalid HTTP method: {}", method)));
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server.cors"
    }
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3002
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3001".to_string()]
}

fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "OPTIONS".to_string()]
}

fn default_cors_headers() -> Vec<String> {
    vec!["Content-Type".to_string(), "Authorization".to_string()]
}

fn default_cors_max_age() -> Duration {
    Duration::from_secs(3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.port, 3002);
        assert_eq!(config.socket_address(), "127.0.0.1:3002");
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3001"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_config_validation() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.api_prefix = "api".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.api_prefix = "/api/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_validation() {
        let mut cors = CorsConfig::default();
        cors.allowed_origins = vec!["localhost:3001".to_string()];
        assert!(cors.validate().is_err());

        let mut cors = CorsConfig::default();
        cors.allowed_origins = vec!["*".to_string()];
        cors.allow_credentials = true;
        assert!(cors.validate().is_err());

        let mut cors = CorsConfig::default();
        cors.allowed_methods = vec!["FETCH".to_string()];
        assert!(cors.validate().is_err());

        let mut cors = CorsConfig::default();
        cors.enabled = false;
        cors.allowed_origins.clear();
        assert!(cors.validate().is_ok());
    }
}
