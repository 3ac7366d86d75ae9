//! Error types for chain construction.

use thiserror::Error;

/// Errors emitted while building chains.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Chain fields failed validation.
    #[error("invalid chain: {0}")]
    InvalidChain(&'static str),
}

/// Result type alias for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
