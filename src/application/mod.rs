// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Storage trait implemented by infrastructure adapters
//! - [`user_service`]: Registration use cases on top of a [`UserStore`](port::UserStore)
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The REST server and the CLI call the service, never the store directly

pub mod port;
pub mod user_service;

pub use user_service::{ServiceError, UserService};
