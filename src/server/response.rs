// SPDX-License-Identifier: MPL-2.0
//! Response envelope and error mapping.
//!
//! Every endpoint answers with [`ApiResponse`]. Failures go through
//! [`ApiError`], whose [`IntoResponse`] impl picks the status code.

use crate::application::ServiceError;
use crate::domain::user::FieldError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `{ success, message?, data?, errors? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: Option<String>) -> Self {
        Self {
            success: true,
            message,
            data: Some(data),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors,
        }
    }
}

/// Successful reply: status plus envelope.
pub fn reply<T: Serialize>(status: StatusCode, data: T, message: Option<String>) -> Response {
    (status, Json(ApiResponse::ok(data, message))).into_response()
}

/// Message sent for storage failures; details stay in the logs.
pub const STORAGE_FAILURE: &str = "Server error while accessing user data";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("{status}: {message}")]
    Http { status: StatusCode, message: String },
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::Http {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::Http {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(err) => match err {
                ServiceError::Validation(_) | ServiceError::BadRequest(_) => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::NotFound => StatusCode::NOT_FOUND,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Http { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: ApiResponse<()> = match self {
            ApiError::Service(err) => {
                let message = err.to_string();
                match err {
                    ServiceError::Validation(errors) => ApiResponse::failure(message, Some(errors)),
                    ServiceError::Storage(inner) => {
                        tracing::error!(error = %inner, "storage failure");
                        ApiResponse::failure(STORAGE_FAILURE, None)
                    }
                    _ => ApiResponse::failure(message, None),
                }
            }
            ApiError::Http { message, .. } => ApiResponse::failure(message, None),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::Validation(vec![]), StatusCode::BAD_REQUEST),
            (ServiceError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                ServiceError::Storage(Error::Storage("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn envelope_omits_empty_fields() {
        let ok = serde_json::to_value(ApiResponse::ok(true, None)).unwrap();
        assert_eq!(ok, serde_json::json!({ "success": true, "data": true }));

        let failure: ApiResponse<()> = ApiResponse::failure(
            "Input validation failed",
            Some(vec![FieldError::new("name", "too short")]),
        );
        let value = serde_json::to_value(failure).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["errors"][0]["field"], "name");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn validation_response_is_bad_request() {
        let response =
            ApiError::from(ServiceError::Validation(vec![FieldError::new("email", "bad")]))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
