// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`user_store`]: Persistence of registered users
//!
//! # Design Notes
//!
//! - Traits use domain types only
//! - Traits are `Send + Sync` so one store can back the whole server
//! - No `async fn`; async callers wrap calls in `spawn_blocking`

pub mod user_store;

pub use user_store::UserStore;
