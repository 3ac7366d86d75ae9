//! Shared error definitions for primitives.

use thiserror::Error;
use uuid::Error as UuidError;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided chain identifier could not be parsed.
    #[error("invalid chain id: {source}")]
    InvalidChainId {
        /// Source parsing error from the UUID library.
        #[from]
        source: UuidError,
    },

    /// Receiver definition failed validation.
    #[error("invalid receiver: {reason}")]
    InvalidReceiver {
        /// Human-readable reason for rejection.
        reason: String,
    },
}
