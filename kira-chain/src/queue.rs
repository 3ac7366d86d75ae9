//! Per-user queues of follow-up chains.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::Chain;

/// Snapshot describing what a store currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Chains currently queued across all users.
    pub entries: usize,
    /// Users with at least one queued chain.
    pub buckets: usize,
}

/// Follow-up chains queued per user and dequeued lowest `time` first.
///
/// Each user's list is kept sorted by descending time, so the next chain is
/// always at the end. Among chains sharing a time the most recently added
/// leaves first.
#[derive(Debug, Default)]
pub struct ChainReloader {
    chain: Mutex<HashMap<String, Vec<Chain>>>,
}

impl ChainReloader {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Chain>>> {
        self.chain.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues `task` for its user.
    pub fn add_task(&self, task: Chain) {
        let user_id = task.user_id().to_owned();
        let mut guard = self.lock();
        let queue = guard.entry(user_id.clone()).or_default();
        queue.push(task);
        queue.sort_by(|a, b| b.time().cmp(&a.time()));
        debug!(user = %user_id, pending = queue.len(), "chain task added");
    }

    /// Removes and returns the user's chain with the lowest time.
    #[must_use]
    pub fn get_task(&self, user_id: &str) -> Option<Chain> {
        let mut guard = self.lock();
        let queue = guard.get_mut(user_id)?;
        let task = queue.pop();
        if queue.is_empty() {
            guard.remove(user_id);
        }
        drop(guard);
        debug!(user = %user_id, found = task.is_some(), "chain task consumed");
        task
    }

    /// Returns how many chains are queued for `user_id`.
    #[must_use]
    pub fn pending_for(&self, user_id: &str) -> usize {
        self.lock().get(user_id).map_or(0, Vec::len)
    }

    /// Returns the total number of queued chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    /// Returns `true` when no chain is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns utilisation statistics.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let guard = self.lock();
        StoreStats {
            entries: guard.values().map(Vec::len).sum(),
            buckets: guard.len(),
        }
    }
}
