// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `ToastEntry` struct together with the `Category`
//! and `Anchor` enums used throughout the notification system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Display time used when the caller does not pick one.
pub const DEFAULT_DURATION_MS: u64 = 3000;

/// Unique identifier for a toast.
///
/// Identifiers are handed out by a [`Registry`](super::Registry) in strictly
/// increasing order and are never reused within that registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub(crate) fn from_seq(seq: u64) -> Self {
        Self(seq)
    }

    /// Returns the raw sequence number.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Semantic intent of a toast. Drives its icon and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Success,
        Category::Error,
        Category::Warning,
        Category::Info,
    ];

    /// Parses a category name, falling back to [`Category::Info`] for
    /// anything unrecognized.
    #[must_use]
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Category::Success,
            "error" => Category::Error,
            "warning" => Category::Warning,
            _ => Category::Info,
        }
    }

    /// Glyph shown at the start of the toast.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Category::Success => "✓",
            Category::Error => "✕",
            Category::Warning => "⚠",
            Category::Info => "ℹ",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Error => "error",
            Category::Warning => "warning",
            Category::Info => "info",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen position at which a toast and its siblings are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    #[default]
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

impl Anchor {
    /// All anchors, in the order groups are laid out.
    pub const ALL: [Anchor; 6] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::TopCenter,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::BottomCenter,
    ];

    /// Parses an anchor name such as `bottom-center`, falling back to
    /// [`Anchor::TopRight`].
    #[must_use]
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "top-left" => Anchor::TopLeft,
            "top-center" => Anchor::TopCenter,
            "bottom-left" => Anchor::BottomLeft,
            "bottom-right" => Anchor::BottomRight,
            "bottom-center" => Anchor::BottomCenter,
            _ => Anchor::TopRight,
        }
    }

    /// Position of this anchor in [`Anchor::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Anchor::TopLeft => 0,
            Anchor::TopRight => 1,
            Anchor::TopCenter => 2,
            Anchor::BottomLeft => 3,
            Anchor::BottomRight => 4,
            Anchor::BottomCenter => 5,
        }
    }

    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::TopRight | Anchor::TopCenter)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::TopCenter => "top-center",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
            Anchor::BottomCenter => "bottom-center",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied overrides for a single toast.
///
/// Unset fields fall back to the facade defaults (3000 ms, top-right unless
/// configured otherwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToastOptions {
    /// Display time in milliseconds. Negative values are clamped to zero,
    /// and zero keeps the toast until it is dismissed.
    pub duration_ms: Option<i64>,
    pub anchor: Option<Anchor>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Keeps the toast on screen until it is dismissed.
    #[must_use]
    pub fn sticky(self) -> Self {
        self.duration_ms(0)
    }

    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }
}

/// A toast living in the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastEntry {
    id: ToastId,
    message: String,
    category: Category,
    duration_ms: u64,
    anchor: Anchor,
    created_at: Instant,
}

impl ToastEntry {
    pub(crate) fn new(
        id: ToastId,
        message: String,
        category: Category,
        duration_ms: u64,
        anchor: Anchor,
        created_at: Instant,
    ) -> Self {
        Self {
            id,
            message,
            category,
            duration_ms,
            anchor,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Display time in milliseconds; zero means "until dismissed".
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns whether this toast is removed by a timer.
    #[must_use]
    pub fn auto_dismisses(&self) -> bool {
        self.duration_ms > 0
    }

    /// Instant after which the toast may be removed, if it auto-dismisses.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.auto_dismisses()
            .then(|| self.created_at + Duration::from_millis(self.duration_ms))
    }
}

/// Clamps a caller-supplied duration into the non-negative range.
#[must_use]
pub fn clamp_duration(duration_ms: i64) -> u64 {
    u64::try_from(duration_ms).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_id_display_is_prefixed() {
        assert_eq!(ToastId::from_seq(7).to_string(), "toast-7");
    }

    #[test]
    fn unknown_category_falls_back_to_info() {
        assert_eq!(Category::parse_lossy("celebration"), Category::Info);
        assert_eq!(Category::parse_lossy(" ERROR "), Category::Error);
        assert_eq!(Category::default(), Category::Info);
    }

    #[test]
    fn category_icons_are_distinct() {
        let icons: Vec<_> = Category::ALL.iter().map(|c| c.icon()).collect();
        for (i, a) in icons.iter().enumerate() {
            for b in &icons[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn anchor_names_round_trip_through_parse() {
        for anchor in Anchor::ALL {
            assert_eq!(Anchor::parse_lossy(anchor.as_str()), anchor);
        }
        assert_eq!(Anchor::parse_lossy("middle"), Anchor::TopRight);
    }

    #[test]
    fn anchor_index_matches_all_order() {
        for (i, anchor) in Anchor::ALL.iter().enumerate() {
            assert_eq!(anchor.index(), i);
        }
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        assert_eq!(clamp_duration(-50), 0);
        assert_eq!(clamp_duration(0), 0);
        assert_eq!(clamp_duration(1200), 1200);
    }

    #[test]
    fn sticky_entry_has_no_deadline() {
        let now = Instant::now();
        let entry = ToastEntry::new(
            ToastId::from_seq(1),
            "kept".into(),
            Category::Error,
            0,
            Anchor::TopRight,
            now,
        );
        assert!(!entry.auto_dismisses());
        assert!(entry.deadline().is_none());
    }

    #[test]
    fn deadline_adds_duration_to_creation() {
        let now = Instant::now();
        let entry = ToastEntry::new(
            ToastId::from_seq(1),
            "timed".into(),
            Category::Info,
            250,
            Anchor::BottomLeft,
            now,
        );
        assert_eq!(entry.deadline(), Some(now + Duration::from_millis(250)));
    }

    #[test]
    fn options_builder_sets_fields() {
        let options = ToastOptions::new().duration_ms(4000).anchor(Anchor::BottomCenter);
        assert_eq!(options.duration_ms, Some(4000));
        assert_eq!(options.anchor, Some(Anchor::BottomCenter));
        assert_eq!(ToastOptions::new().sticky().duration_ms, Some(0));
    }
}
