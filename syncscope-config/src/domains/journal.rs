//! journalctl invocation settings

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Journal reader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// journalctl binary, resolved through PATH when not absolute
    #[serde(default = "default_journalctl_path")]
    pub journalctl_path: String,

    /// Prefix invocations with `sudo -n`
    #[serde(default = "crate::domains::utils::default_false")]
    pub use_sudo: bool,

    /// Cap on captured stdout per invocation
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,

    /// Per-invocation deadline
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_timeout")]
    pub timeout: Duration,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            journalctl_path: default_journalctl_path(),
            use_sudo: false,
            max_output_bytes: default_max_output_bytes(),
            timeout: default_timeout(),
        }
    }
}

impl Validatable for JournalConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.journalctl_path, "journalctl_path", self.domain_name())?;
        validate_positive(self.max_output_bytes, "max_output_bytes", self.domain_name())?;
        validate_positive(self.timeout.as_secs(), "timeout", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "journal"
    }
}

fn default_journalctl_path() -> String {
    "journalctl".to_string()
}

fn default_max_output_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_timeout() -> Duration {
    Duration::from_secs(15)
}
