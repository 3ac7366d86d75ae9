//! Correlation records and the two task stores built on them.
//!
//! A [`Chain`] suspends work for a user. Chains waiting for an external
//! authorization live in the [`AuthReloader`] keyed by their id; follow-up
//! state that should resume on a later turn lives in the [`ChainReloader`]
//! queued per user.
//!
//! Neither store expires entries. Every chain that is added must be consumed
//! exactly once, including on error paths, or it stays resident for the life
//! of the process.

#![warn(missing_docs, clippy::pedantic)]

pub mod auth;
pub mod error;
pub mod queue;
pub mod record;

pub use auth::AuthReloader;
pub use error::{ChainError, ChainResult};
pub use queue::{ChainReloader, StoreStats};
pub use record::{Chain, ChainBuilder};
