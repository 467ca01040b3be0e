// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! # Available Adapters
//!
//! - [`json_store`]: [`UserStore`] backed by `users.json`
//! - [`memory_store`]: [`UserStore`] kept in memory
//! - [`api_client`]: `reqwest` client for the REST API, with toast reporting
//!
//! [`UserStore`]: crate::application::port::UserStore

pub mod api_client;
pub mod json_store;
pub mod memory_store;

pub use api_client::{ApiClient, Reply, RequestError, RequestPolicy};
pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
