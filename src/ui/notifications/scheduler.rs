// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss timers.
//!
//! Every toast with a non-zero duration gets one deferred task keyed by its
//! id. The scheduler never touches the registry itself; [`Scheduler::expired`]
//! hands back the ids whose deadline has passed and the caller removes them.

use super::toast::{ToastEntry, ToastId};
use std::collections::HashMap;
use std::time::Instant;

/// A one-shot task that fires at `deadline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredTask {
    pub id: ToastId,
    pub deadline: Instant,
}

/// Pending auto-dismiss tasks.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: HashMap<ToastId, Instant>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a task for `entry` if it auto-dismisses. Returns whether a task
    /// was armed.
    pub fn arm_for(&mut self, entry: &ToastEntry) -> bool {
        match entry.deadline() {
            Some(deadline) => {
                self.arm(entry.id(), deadline);
                true
            }
            None => false,
        }
    }

    /// Arms (or re-arms) the task for `id`.
    pub fn arm(&mut self, id: ToastId, deadline: Instant) {
        self.pending.insert(id, deadline);
    }

    /// Cancels the task for `id`. Cancelling an unknown or already-fired id
    /// is a no-op that returns `false`.
    pub fn cancel(&mut self, id: ToastId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Removes and returns every task whose deadline is at or before `now`,
    /// earliest first.
    pub fn expired(&mut self, now: Instant) -> Vec<DeferredTask> {
        let mut fired: Vec<DeferredTask> = self
            .pending
            .iter()
            .filter(|(_, &deadline)| deadline <= now)
            .map(|(&id, &deadline)| DeferredTask { id, deadline })
            .collect();

        for task in &fired {
            self.pending.remove(&task.id);
        }

        fired.sort_by_key(|task| (task.deadline, task.id));
        fired
    }

    #[must_use]
    pub fn is_armed(&self, id: ToastId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
