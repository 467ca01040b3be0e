// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for user feedback.
//!
//! Toasts appear temporarily to tell the user about the outcome of an action
//! (registration saved, request failed) without blocking interaction.
//!
//! # Components
//!
//! - [`toast`] - Toast data model: ids, categories, anchors, options
//! - [`registry`] - Authoritative list of active toasts and change notifications
//! - [`scheduler`] - Cancellable auto-dismiss timers
//! - [`renderer`] - Visual nodes with enter/exit transitions
//! - [`overlay`] - Iced surface drawing the nodes grouped by anchor
//! - [`manager`] - [`Toasts`] facade tying everything together
//!
//! # Usage
//!
//! ```
//! use signup_desk::ui::notifications::{Overlay, ToastOptions, Toasts};
//!
//! let mut toasts: Toasts<Overlay> = Toasts::default();
//! let id = toasts.success("Registration saved", ToastOptions::default());
//!
//! // Clicking the toast sends `Message::Dismiss(id)`; a periodic
//! // `Message::Tick` expires timed toasts.
//! assert!(toasts.dismiss(id));
//! ```

pub mod clock;
pub mod manager;
pub mod overlay;
pub mod registry;
pub mod renderer;
pub mod scheduler;
pub mod toast;

pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{Message as ToastMessage, Toasts};
pub use overlay::Overlay;
pub use registry::{Change, Observer, Registry, ToastDefaults};
pub use renderer::{Phase, RenderTarget, Renderer, ToastNode};
pub use scheduler::{DeferredTask, Scheduler};
pub use toast::{Anchor, Category, ToastEntry, ToastId, ToastOptions, DEFAULT_DURATION_MS};
