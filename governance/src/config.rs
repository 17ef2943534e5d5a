//! Governance configuration with TOML file support.

use agora_utils::{try_init_logging, LogFormat, LoggingError};
use serde::{Deserialize, Serialize};

use crate::GovernanceError;

/// How often a proposal's bundle may run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Any number of successful executions.
    #[default]
    Repeatable,
    /// At most one successful execution; later attempts fail.
    Once,
}

/// Configuration for a governance deployment.
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    #[serde(default)]
    pub execution: ExecutionMode,

    /// Log output format ("human" or "json").
    #[serde(default)]
    pub log_format: LogFormat,

    /// Fallback log filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl GovernanceConfig {
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, GovernanceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GovernanceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        toml::from_str(s).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    /// Install the global tracing subscriber described by this config.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        try_init_logging(self.log_format, &self.log_level)
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            execution: ExecutionMode::default(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
