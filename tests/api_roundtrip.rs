// SPDX-License-Identifier: MPL-2.0
//! Client/server round trips against a live server on an ephemeral port.

use signup_desk::application::user_service::EMAIL_TAKEN;
use signup_desk::domain::user::{CreateUserInput, UpdateUserInput};
use signup_desk::infrastructure::api_client::{ApiClient, RequestError, RequestPolicy, NOT_FOUND};
use signup_desk::server::{self, AppState};
use signup_desk::ui::notifications::{Category, ManualClock, ToastOptions, Toasts};
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct TestServer {
    client: ApiClient,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<signup_desk::error::Result<()>>,
    _data: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let data = tempdir().expect("temp dir");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();

        let state = AppState::with_data_dir(data.path());
        let handle = tokio::spawn(server::serve(listener, state, async {
            let _ = rx.await;
        }));

        let client = ApiClient::with_base_url(&format!("http://{addr}/api"), Duration::from_secs(5))
            .expect("client");

        Self {
            client,
            shutdown: Some(tx),
            handle,
            _data: data,
        }
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.expect("join").expect("server");
    }
}

fn ada() -> CreateUserInput {
    CreateUserInput {
        name: "Ada Lovelace".to_string(),
        email: "Ada@Example.com".to_string(),
        message: "I would like to join the desk.".to_string(),
    }
}

#[tokio::test]
async fn register_list_update_delete() {
    let server = TestServer::start().await;
    let client = &server.client;

    let created = client.create_user(&ada()).await.expect("create");
    assert_eq!(created.data.email, "ada@example.com");
    assert_eq!(
        created.message.as_deref(),
        Some("Thanks for registering, Ada Lovelace! Your details have been saved.")
    );

    let list = client.list_users(None).await.expect("list");
    assert_eq!(list.data.total, 1);

    let found = client.list_users(Some("lovelace")).await.expect("search");
    assert_eq!(found.data.total, 1);
    assert_eq!(found.message.as_deref(), Some("Found 1 matching user"));

    let fetched = client.get_user(&created.data.id).await.expect("get");
    assert_eq!(fetched.data, created.data);

    let updated = client
        .update_user(
            &created.data.id,
            &UpdateUserInput {
                name: Some("Ada King".to_string()),
                ..UpdateUserInput::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.data.name, "Ada King");
    assert_eq!(updated.data.email, "ada@example.com");

    let stats = client.stats().await.expect("stats");
    assert_eq!(stats.data.total, 1);
    assert_eq!(stats.data.today_count, 1);

    let deleted = client.delete_user(&created.data.id).await.expect("delete");
    assert_eq!(deleted.message.as_deref(), Some("User Ada King has been deleted"));
    assert_eq!(client.list_users(None).await.expect("list").data.total, 0);

    server.stop().await;
}

#[tokio::test]
async fn validation_failure_returns_field_errors() {
    let server = TestServer::start().await;

    let err = server
        .client
        .create_user(&CreateUserInput::default())
        .await
        .expect_err("empty input must be rejected");

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Input validation failed");
    let fields: Vec<_> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "email", "message"]);

    server.stop().await;
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let server = TestServer::start().await;
    let client = &server.client;

    client.create_user(&ada()).await.expect("first");
    assert!(!client.check_email("ada@example.com").await.expect("check").data);
    assert!(client.check_email("grace@example.com").await.expect("check").data);

    let err = client.create_user(&ada()).await.expect_err("duplicate");
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), EMAIL_TAKEN);

    server.stop().await;
}

#[tokio::test]
async fn blank_email_check_is_a_bad_request() {
    let server = TestServer::start().await;

    let err = server.client.check_email("  ").await.expect_err("blank");
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Missing email parameter");

    server.stop().await;
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let server = TestServer::start().await;

    let err = server.client.delete_user("nope").await.expect_err("missing");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "User not found");

    server.stop().await;
}

#[tokio::test]
async fn unknown_route_uses_generic_not_found() {
    let data = tempdir().expect("temp dir");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server::serve(
        listener,
        AppState::with_data_dir(data.path()),
        async {
            let _ = rx.await;
        },
    ));

    // Base URL without the `/api` prefix, so every route misses.
    let client = ApiClient::with_base_url(&format!("http://{addr}"), Duration::from_secs(5))
        .expect("client");
    let err = client.stats().await.expect_err("no route");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), NOT_FOUND);

    let _ = tx.send(());
    handle.await.expect("join").expect("server");
}

#[tokio::test]
async fn unreachable_server_becomes_error_toast() {
    // Bind then drop, so nothing listens on the port.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        listener.local_addr().expect("local addr")
    };
    let client = ApiClient::with_base_url(&format!("http://{addr}/api"), Duration::from_secs(2))
        .expect("client");

    let result = client.list_users(None).await;
    assert_eq!(result.as_ref().err(), Some(&RequestError::NoResponse));

    let mut toasts = Toasts::with_clock((), ManualClock::new());
    let id = RequestPolicy::default()
        .report(&mut toasts, &result, ToastOptions::new().duration_ms(4000))
        .expect("error toast");

    let entry = toasts.get(id).expect("entry");
    assert_eq!(entry.category(), Category::Error);
    assert_eq!(entry.message(), "The server did not respond");
    assert_eq!(entry.duration_ms(), 4000);
}
