//! Errors produced by tool registration and execution.

use thiserror::Error;

/// Result alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors produced by tool registration and invocation.
///
/// Lookups never produce an error: a missing tool is reported as `None`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Function descriptor failed validation.
    #[error("invalid function descriptor: {reason}")]
    InvalidDescriptor {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Handler does not honour the tool contract for the supplied descriptor.
    #[error("handler for `{name}` is invalid: {reason}")]
    InvalidHandler {
        /// Name of the descriptor being registered.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The handler's pre-check refused registration.
    #[error("tool `{name}` rejected at registration: {reason}")]
    RegistrationRejected {
        /// Name of the rejected tool.
        name: String,
        /// Reason returned by the pre-check.
        reason: String,
    },

    /// Requested tool does not exist.
    #[error("tool `{name}` is not registered")]
    UnknownTool {
        /// Name of the missing tool.
        name: String,
    },

    /// Tool execution failed.
    #[error("tool execution failed: {reason}")]
    Execution {
        /// Human-readable error returned by the tool implementation.
        reason: String,
    },
}

impl ToolError {
    /// Creates an execution error from the supplied reason.
    #[must_use]
    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
        }
    }
}
