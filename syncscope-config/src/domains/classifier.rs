//! Log line classification settings

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// What a message matching no operation keyword is reported as
    #[serde(default)]
    pub unmatched_operation: UnmatchedOperationSetting,
}

/// Fallback operation for unmatched messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedOperationSetting {
    #[default]
    Pull,
    Unknown,
}

impl FromStr for UnmatchedOperationSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pull" => Ok(Self::Pull),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Invalid unmatched operation: {}", s)),
        }
    }
}

impl Validatable for ClassifierConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "classifier"
    }
}
