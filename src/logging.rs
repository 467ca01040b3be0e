// SPDX-License-Identifier: MPL-2.0
//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` fmt layer in the format chosen by
//! `[logging] format`, filtered by `RUST_LOG` when it is set and by
//! `[logging] level` otherwise.

use crate::config::{LogFormat, LoggingConfig, DEFAULT_LOG_LEVEL};
use crate::error::{Error, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Builds the filter: `RUST_LOG` wins, then the configured level, then
/// [`DEFAULT_LOG_LEVEL`] if the configured one does not parse.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber.
///
/// Safe to call more than once: if a subscriber is already installed (tests,
/// embedding) the call is a no-op.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config);

    let layer = match config.format {
        LogFormat::Pretty => fmt::layer().pretty().with_target(true).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_ansi(false).boxed(),
        LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .or_else(|e| {
            if e.to_string().contains("already been set") {
                Ok(())
            } else {
                Err(Error::Config(format!("failed to initialize logging: {e}")))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        let config = LoggingConfig::default();
        assert!(init(&config).is_ok());
        assert!(init(&LoggingConfig {
            format: LogFormat::Json,
            ..config
        })
        .is_ok());
    }

    #[test]
    fn invalid_level_falls_back_to_default() {
        let config = LoggingConfig {
            level: "[[nonsense".into(),
            format: LogFormat::Compact,
        };
        // Must not panic; RUST_LOG may or may not be set in the test env.
        let _filter = env_filter(&config);
    }
}
