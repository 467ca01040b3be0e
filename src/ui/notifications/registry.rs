// SPDX-License-Identifier: MPL-2.0
//! Toast registry: the single owner of active toast state.
//!
//! The registry stores entries in insertion order and reports every mutation
//! to its [`Observer`] before returning. It knows nothing about timers or
//! rendering; those live in the scheduler and renderer.

use super::toast::{
    clamp_duration, Anchor, Category, ToastEntry, ToastId, ToastOptions, DEFAULT_DURATION_MS,
};
use std::time::Instant;

/// Values applied when a caller leaves a [`ToastOptions`] field unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastDefaults {
    pub duration_ms: u64,
    pub anchor: Anchor,
}

impl Default for ToastDefaults {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            anchor: Anchor::default(),
        }
    }
}

/// A registry mutation, as seen by observers.
#[derive(Debug, Clone, Copy)]
pub enum Change<'a> {
    Added(&'a ToastEntry),
    Removed(&'a ToastEntry),
    /// Every listed entry was removed at once.
    Cleared(&'a [ToastEntry]),
}

/// Receives registry mutations synchronously.
pub trait Observer {
    fn notify(&mut self, change: Change<'_>, at: Instant);
}

impl Observer for () {
    fn notify(&mut self, _change: Change<'_>, _at: Instant) {}
}

impl<A: Observer, B: Observer> Observer for (A, B) {
    fn notify(&mut self, change: Change<'_>, at: Instant) {
        self.0.notify(change, at);
        self.1.notify(change, at);
    }
}

/// Ordered collection of active toasts.
#[derive(Debug)]
pub struct Registry<O = ()> {
    entries: Vec<ToastEntry>,
    next_seq: u64,
    defaults: ToastDefaults,
    observer: O,
}

impl Registry<()> {
    /// Creates a registry without an observer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_observer(())
    }
}

impl Default for Registry<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Observer> Registry<O> {
    #[must_use]
    pub fn with_observer(observer: O) -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 1,
            defaults: ToastDefaults::default(),
            observer,
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: ToastDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn defaults(&self) -> ToastDefaults {
        self.defaults
    }

    /// Creates and stores a new entry, returning its id.
    ///
    /// Never fails: a negative duration is clamped to zero and unset options
    /// take the registry defaults.
    pub fn add(
        &mut self,
        message: impl Into<String>,
        category: Category,
        options: ToastOptions,
        now: Instant,
    ) -> ToastId {
        let id = ToastId::from_seq(self.next_seq);
        self.next_seq += 1;

        let duration_ms = options
            .duration_ms
            .map_or(self.defaults.duration_ms, clamp_duration);
        let anchor = options.anchor.unwrap_or(self.defaults.anchor);

        self.entries.push(ToastEntry::new(
            id,
            message.into(),
            category,
            duration_ms,
            anchor,
            now,
        ));
        if let Some(entry) = self.entries.last() {
            self.observer.notify(Change::Added(entry), now);
        }
        id
    }

    /// Removes the entry with `id`.
    ///
    /// Returns `false` (and notifies nobody) if no such entry exists.
    pub fn remove(&mut self, id: ToastId, now: Instant) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.id() == id) else {
            return false;
        };
        let entry = self.entries.remove(pos);
        self.observer.notify(Change::Removed(&entry), now);
        true
    }

    /// Removes every entry.
    pub fn clear(&mut self, now: Instant) {
        if self.entries.is_empty() {
            return;
        }
        let removed = std::mem::take(&mut self.entries);
        self.observer.notify(Change::Cleared(&removed), now);
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn list(&self) -> &[ToastEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&ToastEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: ToastId) -> bool {
        self.get(id).is_some()
    }

    /// Entries grouped per anchor, in [`Anchor::ALL`] order. Empty groups are
    /// skipped; each group keeps insertion order.
    #[must_use]
    pub fn grouped(&self) -> Vec<(Anchor, Vec<&ToastEntry>)> {
        Anchor::ALL
            .iter()
            .filter_map(|&anchor| {
                let group: Vec<_> = self.entries.iter().filter(|e| e.anchor() == anchor).collect();
                (!group.is_empty()).then_some((anchor, group))
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
