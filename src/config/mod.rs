// SPDX-License-Identifier: MPL-2.0
//! Application configuration, loaded from and saved to `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[server]` - REST API bind address
//! - `[client]` - Base URL and timeout used by the desktop client
//! - `[notifications]` - Toast durations and default anchor
//! - `[logging]` - Log level and output format
//!
//! Every field has a default, so a partial file is valid.
//!
//! # Examples
//!
//! ```no_run
//! use signup_desk::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.notifications.duration_ms = 5000;
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::ui::notifications::{Anchor, ToastDefaults, ToastOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning returned by [`load`] when the file exists but cannot be parsed.
pub const LOAD_WARNING: &str = "Settings could not be read, defaults are in use";

// =============================================================================
// Section Structs
// =============================================================================

/// REST API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl ServerConfig {
    /// Parses the bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(Error::from)
    }
}

/// Desktop client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Timeout clamped to the supported range.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
    }
}

/// Toast settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    /// Display time of regular toasts in milliseconds. Zero keeps them until
    /// dismissed.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Display time of the toast raised for a failed request.
    #[serde(default = "default_error_duration_ms")]
    pub error_duration_ms: u64,

    #[serde(default)]
    pub anchor: Anchor,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            error_duration_ms: default_error_duration_ms(),
            anchor: Anchor::default(),
        }
    }
}

impl NotificationsConfig {
    /// Registry defaults derived from this section.
    #[must_use]
    pub fn toast_defaults(&self) -> ToastDefaults {
        ToastDefaults {
            duration_ms: self.duration_ms.min(MAX_TOAST_DURATION_MS),
            anchor: self.anchor,
        }
    }

    /// Options for request-failure toasts.
    #[must_use]
    pub fn error_options(&self) -> ToastOptions {
        let duration = self.error_duration_ms.min(MAX_TOAST_DURATION_MS);
        ToastOptions::new()
            .duration_ms(i64::try_from(duration).unwrap_or(i64::MAX))
            .anchor(self.anchor)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// Multi-line, colored (for development).
    #[default]
    Pretty,
    /// Single line, no colors.
    Compact,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive (`trace`, `debug`, `info`, `warn`, `error`, or a
    /// full `EnvFilter` string). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// =============================================================================
// Default Value Functions (for serde)
// =============================================================================

fn default_bind() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_duration_ms() -> u64 {
    DEFAULT_TOAST_DURATION_MS
}

fn default_error_duration_ms() -> u64 {
    DEFAULT_ERROR_TOAST_DURATION_MS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

// =============================================================================
// Path Helpers
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). A missing file yields the
/// defaults silently; an unreadable one yields the defaults and a warning.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }

    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "falling back to default settings");
            (Config::default(), Some(LOAD_WARNING.to_string()))
        }
    }
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
