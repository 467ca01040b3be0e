// SPDX-License-Identifier: MPL-2.0
//! Projection of registry state onto a drawing surface.
//!
//! The renderer observes the registry and keeps one [`ToastNode`] per toast,
//! tracking its enter and exit transitions. Nodes are pushed to a
//! [`RenderTarget`], which is the only part that knows how toasts are drawn.
//! A removed toast keeps its node for [`EXIT_TRANSITION`] before the node is
//! unmounted.

use super::registry::{Change, Observer};
use super::toast::{Anchor, Category, ToastEntry, ToastId};
use std::time::{Duration, Instant};

/// Length of the fade-in after a toast appears.
pub const ENTER_TRANSITION: Duration = Duration::from_millis(300);

/// Length of the fade-out after a toast is removed. Independent of the
/// toast's own duration.
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

/// Transition state of a visual node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Shown,
    Exiting,
}

/// Read projection of a toast, as handed to render targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastNode {
    pub id: ToastId,
    pub message: String,
    pub category: Category,
    pub anchor: Anchor,
    pub phase: Phase,
    /// When the current phase started.
    pub since: Instant,
    /// Opacity the exit fade starts from. A toast removed mid fade-in
    /// fades out from where it was.
    pub exit_from: f32,
}

impl ToastNode {
    fn project(entry: &ToastEntry, at: Instant) -> Self {
        Self {
            id: entry.id(),
            message: entry.message().to_owned(),
            category: entry.category(),
            anchor: entry.anchor(),
            phase: Phase::Entering,
            since: at,
            exit_from: 1.0,
        }
    }

    /// Fraction of the current transition that has elapsed, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let span = match self.phase {
            Phase::Entering => ENTER_TRANSITION,
            Phase::Exiting => EXIT_TRANSITION,
            Phase::Shown => return 1.0,
        };
        let elapsed = now.saturating_duration_since(self.since);
        (elapsed.as_secs_f32() / span.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Opacity to draw the node with at `now`.
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            Phase::Entering => self.progress(now),
            Phase::Shown => 1.0,
            Phase::Exiting => self.exit_from * (1.0 - self.progress(now)),
        }
    }

    /// Returns whether the node still responds to clicks.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.phase != Phase::Exiting
    }
}

/// A surface that can display toast nodes.
pub trait RenderTarget {
    /// A new node appeared; its enter transition has started.
    fn mount(&mut self, node: &ToastNode);
    /// An existing node changed phase.
    fn update(&mut self, node: &ToastNode);
    /// The node finished its exit transition and must be discarded.
    fn unmount(&mut self, id: ToastId, anchor: Anchor);
}

/// Headless target, for callers that only need the registry semantics.
impl RenderTarget for () {
    fn mount(&mut self, _node: &ToastNode) {}
    fn update(&mut self, _node: &ToastNode) {}
    fn unmount(&mut self, _id: ToastId, _anchor: Anchor) {}
}

/// Keeps visual nodes in sync with the registry.
#[derive(Debug, Default)]
pub struct Renderer<T> {
    nodes: Vec<ToastNode>,
    target: T,
}

impl<T: RenderTarget> Renderer<T> {
    #[must_use]
    pub fn new(target: T) -> Self {
        Self {
            nodes: Vec::new(),
            target,
        }
    }

    /// Finishes transitions whose time is up. Exited nodes are unmounted.
    pub fn advance(&mut self, now: Instant) {
        let target = &mut self.target;
        self.nodes.retain_mut(|node| match node.phase {
            Phase::Entering if node.progress(now) >= 1.0 => {
                node.phase = Phase::Shown;
                node.since = now;
                target.update(node);
                true
            }
            Phase::Exiting if node.progress(now) >= 1.0 => {
                target.unmount(node.id, node.anchor);
                false
            }
            _ => true,
        });
    }

    fn begin_exit(&mut self, id: ToastId, at: Instant) {
        if let Some(node) = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id && n.phase != Phase::Exiting)
        {
            node.exit_from = node.opacity(at);
            node.phase = Phase::Exiting;
            node.since = at;
            self.target.update(node);
        }
    }

    /// All live nodes (including exiting ones) in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[ToastNode] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, id: ToastId) -> Option<&ToastNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes grouped per anchor in [`Anchor::ALL`] order, skipping empty
    /// groups. Within a group, nodes keep insertion order.
    #[must_use]
    pub fn groups(&self) -> Vec<(Anchor, Vec<&ToastNode>)> {
        Anchor::ALL
            .iter()
            .filter_map(|&anchor| {
                let group: Vec<_> = self.nodes.iter().filter(|n| n.anchor == anchor).collect();
                (!group.is_empty()).then_some((anchor, group))
            })
            .collect()
    }

    /// Returns whether any node is still on screen or in transition.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.nodes.is_empty()
    }

    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }
}

impl<T: RenderTarget> Observer for Renderer<T> {
    fn notify(&mut self, change: Change<'_>, at: Instant) {
        match change {
            Change::Added(entry) => {
                let node = ToastNode::project(entry, at);
                self.target.mount(&node);
                self.nodes.push(node);
            }
            Change::Removed(entry) => self.begin_exit(entry.id(), at),
            Change::Cleared(entries) => {
                for entry in entries {
                    self.begin_exit(entry.id(), at);
                }
            }
        }
    }
}
