//! Structured tracing helpers.

use anyhow::{Context, Result};
use kira_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Builds a filter from a configured level, ignoring `RUST_LOG`.
///
/// # Errors
///
/// Returns an error when `level` is not a valid filter directive.
pub fn filter_for(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("invalid log level `{level}`"))
}

/// Picks `env_directives` when set, falling back to `level`.
///
/// A malformed `RUST_LOG` is an error rather than silently replaced.
fn resolve_filter(env_directives: Option<String>, level: &str) -> Result<EnvFilter> {
    match env_directives {
        Some(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {} directives `{directives}`", EnvFilter::DEFAULT_ENV)),
        None => filter_for(level),
    }
}

/// Installs the global `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` directives take precedence over the configured level.
///
/// # Errors
///
/// Returns an error when the level is invalid or a global subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = resolve_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), &config.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err).context("failed to install tracing subscriber"))?;

    tracing::debug!(level = %config.level, "tracing initialised");
    Ok(())
}
