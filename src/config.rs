//! Workflow configuration loaded from TOML.
//!
//! ```toml
//! write_mode = "compare_and_swap"
//! notify_by_default = true
//! ```
//!
//! Every key is optional. An empty document yields the defaults:
//! last-write-wins persistence and no notification unless asked for.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid workflow configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How the executor persists a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Overwrite whatever is stored. Concurrent changes to the same record
    /// are not detected; the last write wins.
    #[default]
    LastWriteWins,
    /// Write only if the stored state still matches the state the change
    /// was computed from.
    CompareAndSwap,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub write_mode: WriteMode,
    /// Notify the customer when a command does not say either way.
    pub notify_by_default: bool,
}

impl WorkflowConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = WorkflowConfig::from_toml_str("").unwrap();
        assert_eq!(config, WorkflowConfig::default());
        assert_eq!(config.write_mode, WriteMode::LastWriteWins);
        assert!(!config.notify_by_default);
    }

    #[test]
    fn parses_all_keys() {
        let config = WorkflowConfig::from_toml_str(
            r#"
            write_mode = "compare_and_swap"
            notify_by_default = true
            "#,
        )
        .unwrap();

        assert_eq!(config.write_mode, WriteMode::CompareAndSwap);
        assert!(config.notify_by_default);
    }

    #[test]
    fn rejects_unknown_write_mode() {
        let result = WorkflowConfig::from_toml_str(r#"write_mode = "optimistic""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = WorkflowConfig::from_file("/nonexistent/workflow.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
