// SPDX-License-Identifier: MPL-2.0
//! `/api/users` handlers.
//!
//! Store access is synchronous file I/O, so every service call runs on the
//! blocking pool. Each handler logs its outcome with the elapsed time.

use super::response::{reply, ApiError};
use super::AppState;
use crate::application::{port::UserStore, ServiceError, UserService};
use crate::domain::user::{CreateUserInput, UpdateUserInput, UserList};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

type ApiResult = Result<Response, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailParams {
    pub email: Option<String>,
}

/// Runs a service call on the blocking pool.
async fn blocking<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    F: FnOnce(&UserService<Arc<dyn UserStore>>) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|e| ApiError::internal(format!("worker failed: {e}")))?
        .map_err(ApiError::from)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(format!("Malformed request body: {}", rejection.body_text())))
}

fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Logs the outcome of `route` and passes the result through.
fn logged(route: &'static str, started: Instant, result: ApiResult) -> ApiResult {
    let duration_ms = whole_millis(started.elapsed());
    match &result {
        Ok(response) => {
            tracing::info!(route, status = response.status().as_u16(), duration_ms, "request handled");
        }
        Err(err) => {
            tracing::warn!(route, status = err.status().as_u16(), duration_ms, error = %err, "request failed");
        }
    }
    result
}

fn found_message(count: usize) -> String {
    match count {
        1 => "Found 1 matching user".to_string(),
        n => format!("Found {n} matching users"),
    }
}

pub async fn list_users(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult {
    let started = Instant::now();
    let result = async {
        match params.search.filter(|s| !s.is_empty()) {
            Some(search) => {
                let users = blocking(&state, move |svc| svc.search(&search)).await?;
                let message = found_message(users.len());
                Ok(reply(StatusCode::OK, UserList::from(users), Some(message)))
            }
            None => {
                let list = blocking(&state, |svc| svc.get_all()).await?;
                Ok(reply(StatusCode::OK, list, None))
            }
        }
    }
    .await;
    logged("GET /api/users", started, result)
}

pub async fn search_users(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult {
    let started = Instant::now();
    let query = params.query.unwrap_or_default();
    let result = blocking(&state, move |svc| svc.search(&query))
        .await
        .map(|users| {
            let message = found_message(users.len());
            reply(StatusCode::OK, UserList::from(users), Some(message))
        });
    logged("GET /api/users/search", started, result)
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserInput>, JsonRejection>,
) -> ApiResult {
    let started = Instant::now();
    let result = async {
        let input = body(payload)?;
        let user = blocking(&state, move |svc| svc.create(&input)).await?;
        let message = format!(
            "Thanks for registering, {}! Your details have been saved.",
            user.name
        );
        Ok(reply(StatusCode::CREATED, user, Some(message)))
    }
    .await;
    logged("POST /api/users", started, result)
}

pub async fn check_email(State(state): State<AppState>, Query(params): Query<EmailParams>) -> ApiResult {
    let started = Instant::now();
    let result = async {
        let email = params
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing email parameter"))?;
        let available = blocking(&state, move |svc| svc.is_email_available(&email)).await?;
        let message = if available {
            "Email is available"
        } else {
            "Email is already in use"
        };
        Ok(reply(StatusCode::OK, available, Some(message.to_string())))
    }
    .await;
    logged("GET /api/users/check-email", started, result)
}

pub async fn user_stats(State(state): State<AppState>) -> ApiResult {
    let started = Instant::now();
    let result = blocking(&state, |svc| svc.stats())
        .await
        .map(|stats| reply(StatusCode::OK, stats, Some("Statistics loaded".to_string())));
    logged("GET /api/users/stats", started, result)
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let started = Instant::now();
    let result = blocking(&state, move |svc| svc.get_by_id(&id))
        .await
        .map(|user| reply(StatusCode::OK, user, None));
    logged("GET /api/users/:id", started, result)
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserInput>, JsonRejection>,
) -> ApiResult {
    let started = Instant::now();
    let result = async {
        let input = body(payload)?;
        tracing::debug!(user = %id, fields = ?input.fields(), "updating user");
        let user = blocking(&state, move |svc| svc.update(&id, &input)).await?;
        let message = format!("User {} has been updated", user.name);
        Ok(reply(StatusCode::OK, user, Some(message)))
    }
    .await;
    logged("PUT /api/users/:id", started, result)
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let started = Instant::now();
    let result = blocking(&state, move |svc| svc.delete(&id))
        .await
        .map(|user| {
            let message = format!("User {} has been deleted", user.name);
            reply(StatusCode::OK, user, Some(message))
        });
    logged("DELETE /api/users/:id", started, result)
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("The requested resource does not exist")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_logged_in_whole_millis() {
        assert_eq!(whole_millis(Duration::from_micros(2_999)), 2);
        assert_eq!(whole_millis(Duration::from_secs(3)), 3_000);
        assert_eq!(whole_millis(Duration::MAX), u64::MAX);
    }
}
