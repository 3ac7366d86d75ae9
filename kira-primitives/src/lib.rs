//! Core shared types for the Kira function-call core.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod receiver;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Correlation identifier carried by chains and auth callbacks.
pub use ids::ChainId;
/// Address a tool replies to.
pub use receiver::Receiver;
