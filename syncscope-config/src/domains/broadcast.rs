//! Live status polling

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    /// Gap between service probes for each live observer
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_poll_interval")]
    pub poll_interval: Duration,

    /// SSE keep-alive comment interval
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_keep_alive")]
    pub keep_alive: Duration,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            keep_alive: default_keep_alive(),
        }
    }
}

impl Validatable for BroadcastConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.poll_interval.as_secs(), "poll_interval", self.domain_name())?;
        validate_positive(self.keep_alive.as_secs(), "keep_alive", self.domain_name())?;
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "broadcast"
    }
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_keep_alive() -> Duration {
    Duration::from_secs(15)
}
