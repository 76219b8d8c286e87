//! Repository list location

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the list file inside the home directory
pub const DEFAULT_LIST_FILE: &str = ".github-repos-list";

/// Repository registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Newline-separated list of repository names
    #[serde(default = "default_list_path")]
    pub list_path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            list_path: default_list_path(),
        }
    }
}

impl Validatable for RegistryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.list_path.as_os_str().is_empty() {
            return Err(self.validation_error("list_path cannot be empty"));
        }
        // A missing file is not a config error; requests report it instead
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "registry"
    }
}

fn default_list_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_LIST_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIST_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list_path_ends_with_file_name() {
        let config = RegistryConfig::default();
        assert!(config.list_path.ends_with(DEFAULT_LIST_FILE));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_path_rejected() {
        let config = RegistryConfig {
            list_path: PathBuf::new(),
        };
        assert!(config.validate().is_err());
    }
}
