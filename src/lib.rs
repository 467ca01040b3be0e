// SPDX-License-Identifier: MPL-2.0
//! `signup_desk` is a small user-registration desk built with Iced.
//!
//! It bundles a REST API over a JSON file store, a desktop client that talks
//! to it, a data-maintenance CLI, and the toast notification manager that
//! reports the outcome of every request.

#![doc(html_root_url = "https://docs.rs/signup_desk/0.1.0")]

pub mod app;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod server;
pub mod ui;
