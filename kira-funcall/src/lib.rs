//! Tool registry and correlated task chaining for conversational agents.
//!
//! The facade re-exports the workspace crates and provides
//! [`FuncCallContext`], the explicitly constructed object an orchestrator
//! passes around instead of process-wide singletons.

#![warn(missing_docs, clippy::pedantic)]

mod context;

pub use context::FuncCallContext;

/// Re-export shared primitives for convenience.
pub use kira_primitives as primitives;

/// Tool contract and registry.
pub use kira_tools as tools;

/// Chains and task stores.
pub use kira_chain as chain;

/// Configuration loading.
pub use kira_config as config;

/// Logging setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use kira_telemetry as telemetry;
