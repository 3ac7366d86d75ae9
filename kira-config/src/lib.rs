//! Configuration management for the function-call core.
//!
//! Settings come from a JSON document, defaults, and `KIRA_*` environment
//! variables, in increasing order of precedence.

#![warn(missing_docs, clippy::pedantic)]

pub mod loader;
pub mod schema;

pub use loader::{ConfigError, ConfigResult};
pub use schema::{FuncCallConfig, LoggingConfig, RegistryConfig};
