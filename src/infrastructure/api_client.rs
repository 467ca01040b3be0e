// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the REST API, with toast reporting.
//!
//! [`ApiClient`] unwraps the response envelope and classifies failures into
//! [`RequestError`], whose `Display` is the text shown to the user.
//! [`RequestPolicy::report`] turns an outcome into toasts; the desktop app
//! calls it for every finished request.

use crate::config::ClientConfig;
use crate::domain::user::{
    CreateUserInput, FieldError, UpdateUserInput, User, UserList, UserStats,
};
use crate::server::ApiResponse;
use crate::ui::notifications::{Clock, RenderTarget, ToastId, ToastOptions, Toasts};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

pub const UNAUTHORIZED: &str = "Unauthorized, please sign in again";
pub const FORBIDDEN: &str = "Access denied";
pub const NOT_FOUND: &str = "The requested resource does not exist";
pub const SERVER_ERROR: &str = "Server error";
pub const REQUEST_FAILED: &str = "Request failed";

/// Why a request did not produce data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    /// Non-2xx response.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },

    /// 2xx response whose envelope says `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Connection refused or timed out.
    #[error("The server did not respond")]
    NoResponse,

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Decode(String),
}

impl RequestError {
    /// Field errors reported by the server, if any.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            RequestError::Status { errors, .. } => errors,
            _ => &[],
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            RequestError::NoResponse
        } else if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}

/// User-facing message for a failed status. The server's own message wins.
#[must_use]
pub fn status_message(status: u16, body_message: Option<&str>) -> String {
    if let Some(message) = body_message.filter(|m| !m.is_empty()) {
        return message.to_string();
    }
    match status {
        401 => UNAUTHORIZED.to_string(),
        403 => FORBIDDEN.to_string(),
        404 => NOT_FOUND.to_string(),
        500 => SERVER_ERROR.to_string(),
        other => format!("Request failed with status {other}"),
    }
}

/// Unwraps an envelope body received with `status`.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, bytes: &[u8]) -> Result<Reply<T>, RequestError> {
    if !(200..300).contains(&status) {
        let envelope = serde_json::from_slice::<ApiResponse<serde_json::Value>>(bytes).ok();
        let message = envelope.as_ref().and_then(|e| e.message.as_deref());
        return Err(RequestError::Status {
            status,
            message: status_message(status, message),
            errors: envelope.and_then(|e| e.errors).unwrap_or_default(),
        });
    }

    let envelope: ApiResponse<T> =
        serde_json::from_slice(bytes).map_err(|e| RequestError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(RequestError::Rejected(
            envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| REQUEST_FAILED.to_string()),
        ));
    }
    let data = envelope
        .data
        .ok_or_else(|| RequestError::Decode("response carried no data".into()))?;
    Ok(Reply {
        data,
        message: envelope.message,
    })
}

/// Successful response: the envelope's data and message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub data: T,
    pub message: Option<String>,
}

/// Client for `/api/users`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, RequestError> {
        Self::with_base_url(&config.base_url, config.timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Reply<T>, RequestError> {
        let response = request.send().await.inspect_err(|err| {
            tracing::warn!(error = %err, "request did not complete");
        })?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        decode_envelope(status, &bytes).inspect_err(|err| {
            tracing::warn!(status, error = %err, "request failed");
        })
    }

    pub async fn list_users(&self, search: Option<&str>) -> Result<Reply<UserList>, RequestError> {
        let mut request = self.http.get(self.url("/users"));
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            request = request.query(&[("search", search)]);
        }
        self.send(request).await
    }

    pub async fn search_users(&self, query: &str) -> Result<Reply<UserList>, RequestError> {
        self.send(self.http.get(self.url("/users/search")).query(&[("query", query)]))
            .await
    }

    pub async fn get_user(&self, id: &str) -> Result<Reply<User>, RequestError> {
        self.send(self.http.get(self.url(&format!("/users/{id}")))).await
    }

    pub async fn create_user(&self, input: &CreateUserInput) -> Result<Reply<User>, RequestError> {
        self.send(self.http.post(self.url("/users")).json(input)).await
    }

    pub async fn update_user(
        &self,
        id: &str,
        input: &UpdateUserInput,
    ) -> Result<Reply<User>, RequestError> {
        self.send(self.http.put(self.url(&format!("/users/{id}"))).json(input))
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<Reply<User>, RequestError> {
        self.send(self.http.delete(self.url(&format!("/users/{id}")))).await
    }

    pub async fn check_email(&self, email: &str) -> Result<Reply<bool>, RequestError> {
        self.send(self.http.get(self.url("/users/check-email")).query(&[("email", email)]))
            .await
    }

    pub async fn stats(&self) -> Result<Reply<UserStats>, RequestError> {
        self.send(self.http.get(self.url("/users/stats"))).await
    }
}

/// Which toasts a finished request raises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPolicy {
    pub show_success_toast: bool,
    pub show_error_toast: bool,
    pub success_message: String,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            show_success_toast: false,
            show_error_toast: true,
            success_message: "Operation succeeded".to_string(),
        }
    }
}

impl RequestPolicy {
    /// Policy that also confirms success with `message`.
    #[must_use]
    pub fn with_success(message: impl Into<String>) -> Self {
        Self {
            show_success_toast: true,
            success_message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn silent() -> Self {
        Self {
            show_error_toast: false,
            ..Self::default()
        }
    }

    /// Raises the toast this outcome calls for. Failures use
    /// `error_options` (4000 ms at top-right unless configured otherwise).
    pub fn report<D, T, C>(
        &self,
        toasts: &mut Toasts<T, C>,
        outcome: &Result<D, RequestError>,
        error_options: ToastOptions,
    ) -> Option<ToastId>
    where
        T: RenderTarget,
        C: Clock,
    {
        match outcome {
            Ok(_) if self.show_success_toast => {
                Some(toasts.success(self.success_message.clone(), ToastOptions::default()))
            }
            Ok(_) => None,
            Err(err) if self.show_error_toast => Some(toasts.error(err.to_string(), error_options)),
            Err(_) => None,
        }
    }
}
