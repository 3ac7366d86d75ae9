//! Strongly typed configuration schemas.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuncCallConfig {
    /// Tool registry behaviour.
    pub registry: RegistryConfig,
    /// Logging output.
    pub logging: LoggingConfig,
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Tool names never offered by message matching, whatever the caller
    /// passes as its own ignore list.
    pub disabled_tools: Vec<String>,
    /// Emit a warning when a tool name is registered a second time.
    pub warn_on_overwrite: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            disabled_tools: Vec::new(),
            warn_on_overwrite: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "kira_tools=trace").
    pub level: String,
    /// Whether to print the event target.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            with_target: false,
        }
    }
}
