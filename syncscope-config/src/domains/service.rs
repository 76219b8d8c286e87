//! Monitored systemd unit

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, validate_unit_name, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Service probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Unit whose journal and state are observed
    #[serde(default = "default_unit")]
    pub unit: String,

    /// systemctl binary
    #[serde(default = "default_systemctl_path")]
    pub systemctl_path: String,

    /// Per-invocation deadline
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_timeout")]
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            systemctl_path: default_systemctl_path(),
            timeout: default_timeout(),
        }
    }
}

impl Validatable for ServiceConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_unit_name(&self.unit, "unit", self.domain_name())?;
        validate_required_string(&self.systemctl_path, "systemctl_path", self.domain_name())?;
        validate_positive(self.timeout.as_secs(), "timeout", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "service"
    }
}

fn default_unit() -> String {
    "github-sync.service".to_string()
}

fn default_systemctl_path() -> String {
    "systemctl".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(5)
}
