//! Tool discovery and dispatch matching.
//!
//! Tools implement the [`Tool`](tool::Tool) contract and are registered with a
//! [`ToolManager`](registry::ToolManager) once at start-up. Incoming message
//! text is checked against every registered tool to decide which function
//! descriptors the orchestrator should offer next.

#![warn(missing_docs, clippy::pedantic)]

pub mod descriptor;
pub mod error;
pub mod registry;
pub mod tool;

pub use descriptor::FunctionDescriptor;
pub use error::{ToolError, ToolResult};
pub use registry::{ToolBinding, ToolManager};
pub use tool::{HandlerType, Tool, ToolConfig};
