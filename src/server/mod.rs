// SPDX-License-Identifier: MPL-2.0
//! REST API over the user service.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET, POST | `/api/users` | [`handlers::list_users`], [`handlers::create_user`] |
//! | GET | `/api/users/search` | [`handlers::search_users`] |
//! | GET | `/api/users/check-email` | [`handlers::check_email`] |
//! | GET | `/api/users/stats` | [`handlers::user_stats`] |
//! | GET, PUT, DELETE | `/api/users/:id` | [`handlers::get_user`], [`handlers::update_user`], [`handlers::delete_user`] |

pub mod handlers;
pub mod response;

pub use response::{ApiError, ApiResponse};

use crate::application::{port::UserStore, UserService};
use crate::error::Result;
use crate::infrastructure::json_store::JsonFileStore;
use axum::{routing::get, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<UserService<Arc<dyn UserStore>>>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            service: Arc::new(UserService::new(store)),
        }
    }

    /// State backed by `users.json` in `data_dir`.
    pub fn with_data_dir(data_dir: &Path) -> Self {
        Self::new(Arc::new(JsonFileStore::in_dir(data_dir)))
    }
}

/// Builds the application router with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/api/users/search", get(handlers::search_users))
        .route("/api/users/check-email", get(handlers::check_email))
        .route("/api/users/stats", get(handlers::user_stats))
        .route(
            "/api/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .fallback(handlers::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(state)
}

/// Serves `state` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "REST API listening on http://{addr}/api");
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("REST API stopped");
    Ok(())
}

/// Binds `addr` and serves the JSON store in `data_dir` until Ctrl+C.
pub async fn run(addr: SocketAddr, data_dir: &Path) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, AppState::with_data_dir(data_dir), shutdown_signal()).await
}

/// Resolves on Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
