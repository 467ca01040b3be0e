// SPDX-License-Identifier: MPL-2.0
//! End-to-end toast behavior through the public facade, driven by a manual
//! clock so no test sleeps.

use signup_desk::ui::notifications::{
    Anchor, Category, ManualClock, Overlay, Phase, RenderTarget, ToastId, ToastNode, ToastOptions,
    Toasts,
};
use std::collections::HashSet;
use std::time::Duration;

fn headless() -> (Toasts<(), ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (Toasts::with_clock((), clock.clone()), clock)
}

#[test]
fn ids_are_unique_among_active_entries() {
    let (mut toasts, _) = headless();
    let mut seen = HashSet::new();
    for i in 0..200 {
        let id = toasts.info(format!("toast {i}"), ToastOptions::new().sticky());
        assert!(seen.insert(id), "duplicate id {id}");
        if i % 3 == 0 {
            toasts.dismiss(id);
        }
    }
    let active: HashSet<ToastId> = toasts.list().iter().map(|t| t.id()).collect();
    assert_eq!(active.len(), toasts.list().len());
}

#[test]
fn add_then_remove_leaves_nothing() {
    let (mut toasts, _) = headless();
    let id = toasts.success("Saved", ToastOptions::default());
    toasts.dismiss(id);
    assert!(toasts.list().iter().all(|t| t.id() != id));
}

#[test]
fn zero_duration_stays_until_removed() {
    let (mut toasts, clock) = headless();
    let id = toasts.warning("pinned", ToastOptions::new().duration_ms(0));

    clock.advance(Duration::from_secs(3600));
    toasts.tick();
    assert!(toasts.get(id).is_some());

    assert!(toasts.dismiss(id));
    assert!(toasts.list().is_empty());
}

#[test]
fn fifty_ms_toast_is_gone_after_sixty() {
    let (mut toasts, clock) = headless();
    let id = toasts.info("quick", ToastOptions::new().duration_ms(50));

    clock.advance_ms(60);
    toasts.tick();
    assert!(toasts.get(id).is_none());
}

#[test]
fn negative_duration_is_treated_as_sticky() {
    let (mut toasts, clock) = headless();
    let id = toasts.info("odd", ToastOptions::new().duration_ms(-5));

    assert_eq!(toasts.get(id).map(|t| t.duration_ms()), Some(0));
    assert!(!toasts.has_timer(id));
    clock.advance_ms(10_000);
    toasts.tick();
    assert!(toasts.get(id).is_some());
}

#[test]
fn clear_empties_any_number_of_entries() {
    for count in [0, 1, 7, 50] {
        let (mut toasts, _) = headless();
        for i in 0..count {
            toasts.error(format!("{i}"), ToastOptions::default());
        }
        toasts.clear();
        assert!(toasts.list().is_empty());
    }
}

#[test]
fn removing_twice_is_safe() {
    let (mut toasts, _) = headless();
    let id = toasts.info("once", ToastOptions::default());
    assert!(toasts.dismiss(id));
    assert!(!toasts.dismiss(id));
}

#[test]
fn success_defaults() {
    let (mut toasts, _) = headless();
    toasts.success("Saved", ToastOptions::default());

    let list = toasts.list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].category(), Category::Success);
    assert_eq!(list[0].duration_ms(), 3000);
    assert_eq!(list[0].anchor(), Anchor::TopRight);
}

#[test]
fn click_dismiss_of_sticky_error() {
    let (mut toasts, clock) = headless();
    let id = toasts.error("Failed", ToastOptions::new().duration_ms(0));

    toasts.handle_message(signup_desk::ui::notifications::ToastMessage::Dismiss(id));
    assert!(toasts.list().is_empty());
    assert!(!toasts.has_timer(id));

    clock.advance_ms(10_000);
    toasts.tick();
    assert!(toasts.list().is_empty());
}

/// Counts calls per toast so the exit contract can be checked.
#[derive(Debug, Default)]
struct Counting {
    mounts: Vec<ToastId>,
    unmounts: Vec<ToastId>,
    phases: Vec<(ToastId, Phase)>,
}

impl RenderTarget for Counting {
    fn mount(&mut self, node: &ToastNode) {
        self.mounts.push(node.id);
    }

    fn update(&mut self, node: &ToastNode) {
        self.phases.push((node.id, node.phase));
    }

    fn unmount(&mut self, id: ToastId, _anchor: Anchor) {
        self.unmounts.push(id);
    }
}

#[test]
fn exit_transition_unmounts_exactly_once_after_300ms() {
    let clock = ManualClock::new();
    let mut toasts = Toasts::with_clock(Counting::default(), clock.clone());
    let id = toasts.info("fading", ToastOptions::new().duration_ms(100));

    clock.advance_ms(100);
    toasts.tick();
    assert!(toasts.get(id).is_none());
    assert!(toasts.target().unmounts.is_empty(), "node must stay for the fade");

    clock.advance_ms(299);
    toasts.tick();
    assert!(toasts.target().unmounts.is_empty());

    clock.advance_ms(1);
    toasts.tick();
    clock.advance_ms(1000);
    toasts.tick();

    assert_eq!(toasts.target().mounts, vec![id]);
    assert_eq!(toasts.target().unmounts, vec![id]);
    assert!(toasts.target().phases.contains(&(id, Phase::Exiting)));
    assert!(!toasts.needs_tick());
}

#[test]
fn overlay_groups_follow_anchor_option() {
    let clock = ManualClock::new();
    let mut toasts = Toasts::with_clock(Overlay::new(), clock.clone());
    toasts.info("a", ToastOptions::new().anchor(Anchor::BottomLeft));
    toasts.info("b", ToastOptions::default());
    toasts.info("c", ToastOptions::new().anchor(Anchor::BottomLeft));

    let overlay = toasts.target();
    let bottom_left: Vec<_> = overlay
        .group(Anchor::BottomLeft)
        .iter()
        .map(|n| n.message.as_str())
        .collect();
    assert_eq!(bottom_left, vec!["a", "c"]);
    assert_eq!(overlay.group(Anchor::TopRight).len(), 1);

    toasts.clear();
    clock.advance_ms(300);
    toasts.tick();
    assert!(toasts.target().is_empty());
}
