//! Observability utilities.

#![warn(missing_docs, clippy::pedantic)]

pub mod tracing_support;

pub use tracing_support::{filter_for, init};
