// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! screen owns a `State`, turns widget `Message`s into `Event`s in its
//! `update`, and leaves side effects (requests, toasts) to the app.
//!
//! # Screens
//!
//! - [`registration`] - Registration form with inline validation
//! - [`user_list`] - Registered users with search, statistics and delete
//!
//! # Shared Infrastructure
//!
//! - [`notifications`] - Toast notification lifecycle and overlay
//! - [`styles`] - Button, container and text styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod notifications;
pub mod registration;
pub mod styles;
pub mod user_list;
