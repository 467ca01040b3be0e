// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration.
//!
//! # Categories
//!
//! - **Server**: REST API bind address
//! - **Client**: Base URL and request timeout
//! - **Notifications**: Toast durations and anchor
//! - **Logging**: Log level

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Address the REST API listens on.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4321";

// ==========================================================================
// Client Defaults
// ==========================================================================

/// Base URL the desktop client talks to.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4321/api";

/// Request timeout (in seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Minimum request timeout (in seconds).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Display time of a regular toast (in milliseconds).
pub const DEFAULT_TOAST_DURATION_MS: u64 = crate::ui::notifications::DEFAULT_DURATION_MS;

/// Display time of the toast raised for a failed request (in milliseconds).
pub const DEFAULT_ERROR_TOAST_DURATION_MS: u64 = 4000;

/// Longest display time accepted from the config file (in milliseconds).
/// Zero (sticky) is always allowed.
pub const MAX_TOAST_DURATION_MS: u64 = 60_000;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Log level used when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";
