// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! [`Toasts`] is the entry point the rest of the application talks to. It
//! owns the registry (with the renderer as its observer) and the scheduler,
//! so a timer can always be cancelled when its toast goes away.

use super::clock::{Clock, SystemClock};
use super::registry::{Registry, ToastDefaults};
use super::renderer::{RenderTarget, Renderer};
use super::scheduler::Scheduler;
use super::toast::{Category, ToastEntry, ToastId, ToastOptions};

/// Messages for toast state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The user clicked a toast (or its close button).
    Dismiss(ToastId),
    /// Periodic tick that fires timers and advances transitions.
    Tick,
}

/// Toast facade: category shortcuts, dismissal, and the timer loop.
#[derive(Debug)]
pub struct Toasts<T, C = SystemClock> {
    registry: Registry<Renderer<T>>,
    scheduler: Scheduler,
    clock: C,
}

impl<T: RenderTarget> Toasts<T, SystemClock> {
    /// Creates a facade drawing onto `target` with the system clock.
    #[must_use]
    pub fn new(target: T) -> Self {
        Self::with_clock(target, SystemClock)
    }
}

impl<T: RenderTarget + Default> Default for Toasts<T, SystemClock> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: RenderTarget, C: Clock> Toasts<T, C> {
    #[must_use]
    pub fn with_clock(target: T, clock: C) -> Self {
        Self {
            registry: Registry::with_observer(Renderer::new(target)),
            scheduler: Scheduler::new(),
            clock,
        }
    }

    /// Replaces the duration and anchor used when options leave them unset.
    #[must_use]
    pub fn with_defaults(mut self, defaults: ToastDefaults) -> Self {
        self.registry = self.registry.with_defaults(defaults);
        self
    }

    /// Shows a toast and arms its timer. Returns the new id so the caller can
    /// dismiss it early.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        category: Category,
        options: ToastOptions,
    ) -> ToastId {
        let now = self.clock.now();
        let id = self.registry.add(message, category, options, now);
        if let Some(entry) = self.registry.get(id) {
            self.scheduler.arm_for(entry);
            tracing::debug!(
                toast = %id,
                category = %entry.category(),
                anchor = %entry.anchor(),
                duration_ms = entry.duration_ms(),
                "toast shown"
            );
        }
        id
    }

    pub fn success(&mut self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        self.show(message, Category::Success, options)
    }

    pub fn error(&mut self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        self.show(message, Category::Error, options)
    }

    pub fn warning(&mut self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        self.show(message, Category::Warning, options)
    }

    pub fn info(&mut self, message: impl Into<String>, options: ToastOptions) -> ToastId {
        self.show(message, Category::Info, options)
    }

    /// Dismisses a toast right away, cancelling its timer.
    ///
    /// Returns `false` if the toast was already gone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        self.scheduler.cancel(id);
        let removed = self.registry.remove(id, self.clock.now());
        if removed {
            tracing::debug!(toast = %id, "toast dismissed");
        }
        removed
    }

    /// Dismisses every toast.
    pub fn clear(&mut self) {
        self.scheduler.cancel_all();
        self.registry.clear(self.clock.now());
    }

    /// Fires expired timers and advances enter/exit transitions.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        for task in self.scheduler.expired(now) {
            if self.registry.remove(task.id, now) {
                tracing::debug!(toast = %task.id, "toast expired");
            }
        }
        self.registry.observer_mut().advance(now);
    }

    /// Handles a toast message.
    pub fn handle_message(&mut self, message: Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(id);
            }
            Message::Tick => self.tick(),
        }
    }

    /// Active toasts in insertion order.
    #[must_use]
    pub fn list(&self) -> &[ToastEntry] {
        self.registry.list()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&ToastEntry> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn has_timer(&self, id: ToastId) -> bool {
        self.scheduler.is_armed(id)
    }

    /// Returns whether the tick loop still has work: live toasts or nodes
    /// in transition.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        !self.registry.is_empty() || self.renderer().is_animating()
    }

    #[must_use]
    pub fn renderer(&self) -> &Renderer<T> {
        self.registry.observer()
    }

    #[must_use]
    pub fn target(&self) -> &T {
        self.renderer().target()
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::clock::ManualClock;
    use crate::ui::notifications::renderer::EXIT_TRANSITION;
    use crate::ui::notifications::toast::Anchor;

    fn toasts() -> (Toasts<(), ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (Toasts::with_clock((), clock.clone()), clock)
    }

    #[test]
    fn success_uses_documented_defaults() {
        let (mut toasts, _) = toasts();
        toasts.success("Saved", ToastOptions::default());

        let list = toasts.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category(), Category::Success);
        assert_eq!(list[0].duration_ms(), 3000);
        assert_eq!(list[0].anchor(), Anchor::TopRight);
    }

    #[test]
    fn facade_shortcuts_set_category() {
        let (mut toasts, _) = toasts();
        let ids = [
            toasts.success("", ToastOptions::default()),
            toasts.error("", ToastOptions::default()),
            toasts.warning("", ToastOptions::default()),
            toasts.info("", ToastOptions::default()),
        ];
        let categories: Vec<_> = ids
            .iter()
            .map(|id| toasts.get(*id).unwrap().category())
            .collect();
        assert_eq!(
            categories,
            vec![Category::Success, Category::Error, Category::Warning, Category::Info]
        );
    }

    #[test]
    fn timed_toast_expires_after_duration() {
        let (mut toasts, clock) = toasts();
        let id = toasts.info("brief", ToastOptions::new().duration_ms(50));

        clock.advance_ms(49);
        toasts.tick();
        assert!(toasts.get(id).is_some());

        clock.advance_ms(11);
        toasts.tick();
        assert!(toasts.get(id).is_none());
        assert!(!toasts.has_timer(id));
    }

    #[test]
    fn sticky_toast_survives_ticks() {
        let (mut toasts, clock) = toasts();
        let id = toasts.warning("stays", ToastOptions::new().sticky());
        assert!(!toasts.has_timer(id));

        for _ in 0..100 {
            clock.advance_ms(1000);
            toasts.tick();
        }
        assert!(toasts.get(id).is_some());
    }

    #[test]
    fn click_dismiss_cancels_timer() {
        let (mut toasts, clock) = toasts();
        let id = toasts.error("Failed", ToastOptions::new().duration_ms(200));

        toasts.handle_message(Message::Dismiss(id));
        assert!(toasts.list().is_empty());
        assert!(!toasts.has_timer(id));

        // A later entry must not be disturbed by the cancelled timer.
        let other = toasts.info("next", ToastOptions::new().sticky());
        clock.advance_ms(500);
        toasts.tick();
        assert!(toasts.get(other).is_some());
    }

    #[test]
    fn dismiss_twice_is_harmless() {
        let (mut toasts, _) = toasts();
        let id = toasts.info("x", ToastOptions::default());
        assert!(toasts.dismiss(id));
        assert!(!toasts.dismiss(id));
    }

    #[test]
    fn clear_cancels_all_timers() {
        let (mut toasts, _) = toasts();
        let ids: Vec<_> = (0..4)
            .map(|i| toasts.info(format!("{i}"), ToastOptions::default()))
            .collect();
        toasts.clear();

        assert!(toasts.list().is_empty());
        assert!(ids.iter().all(|id| !toasts.has_timer(*id)));
    }

    #[test]
    fn needs_tick_until_exit_transition_ends() {
        let (mut toasts, clock) = toasts();
        assert!(!toasts.needs_tick());

        let id = toasts.info("x", ToastOptions::default());
        assert!(toasts.needs_tick());

        toasts.dismiss(id);
        assert!(toasts.needs_tick(), "exit transition still running");

        clock.advance(EXIT_TRANSITION);
        toasts.handle_message(Message::Tick);
        assert!(!toasts.needs_tick());
    }

    #[test]
    fn configured_defaults_apply() {
        let clock = ManualClock::new();
        let mut toasts = Toasts::with_clock((), clock).with_defaults(ToastDefaults {
            duration_ms: 1000,
            anchor: Anchor::BottomLeft,
        });
        let id = toasts.info("x", ToastOptions::default());
        let entry = toasts.get(id).unwrap();
        assert_eq!(entry.duration_ms(), 1000);
        assert_eq!(entry.anchor(), Anchor::BottomLeft);
    }
}
