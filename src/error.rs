// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Payloads are stored as strings so the error stays `Clone` and can travel
//! inside iced messages.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("JSON Error: {0}")]
    Json(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// The user data file exists but cannot be used.
    #[error("Storage Error: {0}")]
    Storage(String),

    #[error("Invalid address: {0}")]
    Addr(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<std::net::AddrParseError> for Error {
    fn from(err: std::net::AddrParseError) -> Self {
        Error::Addr(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn from_json_error_produces_json_variant() {
        let json_error = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(matches!(Error::from(json_error), Error::Json(_)));
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn addr_parse_error_is_reported() {
        let err: Error = "not-an-addr".parse::<std::net::SocketAddr>().unwrap_err().into();
        assert!(matches!(err, Error::Addr(_)));
    }
}
