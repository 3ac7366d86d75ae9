//! Configuration loader implementations.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::FuncCallConfig;

/// Environment variable overriding [`LoggingConfig::level`](crate::LoggingConfig::level).
pub const ENV_LOG_LEVEL: &str = "KIRA_LOG_LEVEL";
/// Environment variable holding a comma-separated list of disabled tools.
pub const ENV_DISABLED_TOOLS: &str = "KIRA_DISABLED_TOOLS";

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration: {source}")]
    Io {
        /// Source [`std::io::Error`].
        #[from]
        source: std::io::Error,
    },
    /// Configuration document is not valid JSON for the schema.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source [`serde_json::Error`].
        #[from]
        source: serde_json::Error,
    },
    /// Configuration parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl FuncCallConfig {
    /// Parses a JSON document. Missing sections fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// errors of [`from_json_str`](Self::from_json_str).
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Builds the configuration from defaults and the process environment,
    /// loading a `.env` file first when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the overrides produce an unusable
    /// configuration.
    pub fn from_env() -> ConfigResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Applies `KIRA_*` environment overrides on top of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the result fails validation.
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the result fails validation.
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            debug!(%level, "log level overridden from environment");
            self.logging.level = level;
        }
        if let Some(disabled) = lookup(ENV_DISABLED_TOOLS) {
            self.registry.disabled_tools = disabled
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect();
            debug!(tools = ?self.registry.disabled_tools, "disabled tools overridden from environment");
        }
        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the log level is blank.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging level must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config = FuncCallConfig::from_json_str("{}").unwrap();
        assert_eq!(config, FuncCallConfig::default());
        assert!(config.registry.warn_on_overwrite);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = FuncCallConfig::from_json_str(
            r#"{ "registry": { "disabled_tools": ["search"] }, "logging": { "level": "debug" } }"#,
        )
        .unwrap();
        assert_eq!(config.registry.disabled_tools, ["search"]);
        assert!(config.registry.warn_on_overwrite);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.with_target);
    }

    #[test]
    fn rejects_blank_level() {
        let err = FuncCallConfig::from_json_str(r#"{ "logging": { "level": " " } }"#)
            .expect_err("blank level should fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = FuncCallConfig::from_json_str("{ nope").expect_err("garbage should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn overrides_replace_values() {
        let config = FuncCallConfig::default()
            .with_overrides(|key| match key {
                ENV_LOG_LEVEL => Some("trace".into()),
                ENV_DISABLED_TOOLS => Some(" weather, ,search ".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.registry.disabled_tools, ["weather", "search"]);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "registry": {{ "warn_on_overwrite": false }} }}"#).unwrap();

        let config = FuncCallConfig::from_file(file.path()).unwrap();
        assert!(!config.registry.warn_on_overwrite);

        let err = FuncCallConfig::from_file(file.path().with_extension("missing"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
