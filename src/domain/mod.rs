// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business types and rules.
//!
//! This module holds the user model, its validation rules and the
//! statistics computed over it. It depends only on `serde`, `chrono` and
//! `rand` and knows nothing about storage, HTTP or the UI.
//!
//! # Modules
//!
//! - [`user`]: [`User`](user::User), input payloads, [`UserStats`](user::UserStats)
//!   and validation ([`FieldError`](user::FieldError))

pub mod user;
