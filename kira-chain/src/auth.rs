//! One-shot store of chains waiting for user authorization.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use kira_primitives::ChainId;
use tracing::debug;

use crate::Chain;

/// Pending authorizations keyed by chain id.
///
/// [`get_task`](Self::get_task) removes the entry it returns, so an
/// authorization is consumed at most once even under concurrent callers.
#[derive(Debug, Default)]
pub struct AuthReloader {
    auth: Mutex<HashMap<ChainId, Chain>>,
}

impl AuthReloader {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChainId, Chain>> {
        self.auth.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `task` under its id, replacing any entry with the same id.
    pub fn add_task(&self, task: Chain) {
        let id = task.uuid();
        let replaced = self.lock().insert(id, task).is_some();
        debug!(chain = %id, replaced, "auth task added");
    }

    /// Removes and returns the chain stored under `uuid`.
    #[must_use]
    pub fn get_task(&self, uuid: &ChainId) -> Option<Chain> {
        let task = self.lock().remove(uuid);
        debug!(chain = %uuid, found = task.is_some(), "auth task consumed");
        task
    }

    /// Returns the number of pending authorizations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
