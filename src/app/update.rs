// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Every finished request goes through a [`RequestPolicy`], which raises the
//! error toast (or the success toast, when asked for) before the result is
//! applied to screen state.

use super::{App, Message, Response, Screen};
use crate::infrastructure::api_client::{ApiClient, RequestError, RequestPolicy};
use crate::ui::notifications::ToastOptions;
use crate::ui::{registration, user_list};
use iced::Task;
use std::future::Future;

/// Error text used when no HTTP client could be built.
pub const CLIENT_UNAVAILABLE: &str = "HTTP client unavailable";

const REGISTERED: &str = "Registration saved";
const DELETED: &str = "User deleted";
const FIX_FIELDS: &str = "Please correct the highlighted fields";

/// Main update dispatcher.
pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::SwitchScreen(screen) => {
            app.screen = screen;
            if screen == Screen::Users {
                let event = app.users.reload();
                handle_user_list_event(app, event)
            } else {
                Task::none()
            }
        }
        Message::Registration(msg) => {
            let event = registration::update(&mut app.registration, msg);
            handle_registration_event(app, event)
        }
        Message::UserList(msg) => {
            let event = user_list::update(&mut app.users, msg);
            handle_user_list_event(app, event)
        }
        Message::Toast(msg) => {
            app.toasts.handle_message(msg);
            Task::none()
        }
        Message::EmailChecked { email, result } => {
            report(app, &RequestPolicy::default(), &result);
            match result {
                Ok(reply) => {
                    app.registration.email_checked(&email, Some(reply.data));
                    if !reply.data {
                        app.toasts.warning(
                            crate::application::user_service::EMAIL_TAKEN,
                            ToastOptions::default(),
                        );
                    }
                }
                Err(_) => app.registration.email_checked(&email, None),
            }
            Task::none()
        }
        Message::Registered(result) => {
            let policy = success_policy(&result, REGISTERED);
            report(app, &policy, &result);
            match result {
                Ok(reply) => {
                    tracing::info!(user = %reply.data.id, "registration accepted");
                    app.registration.submit_succeeded();
                    Task::none()
                }
                Err(err) => {
                    app.registration.submit_failed(err.field_errors());
                    Task::none()
                }
            }
        }
        Message::UsersLoaded(result) => {
            report(app, &RequestPolicy::default(), &result);
            match result {
                Ok(reply) => app.users.set_users(reply.data),
                Err(_) => app.users.load_failed(),
            }
            Task::none()
        }
        Message::StatsLoaded(result) => {
            // The list request already reports an unreachable server.
            report(app, &RequestPolicy::silent(), &result);
            if let Ok(reply) = result {
                app.users.set_stats(reply.data);
            }
            Task::none()
        }
        Message::UserDeleted(result) => {
            let policy = success_policy(&result, DELETED);
            report(app, &policy, &result);
            match result {
                Ok(reply) => {
                    app.users.remove(&reply.data.id);
                    load_stats(app)
                }
                Err(_) => Task::none(),
            }
        }
    }
}

fn handle_registration_event(app: &mut App, event: registration::Event) -> Task<Message> {
    match event {
        registration::Event::None => Task::none(),
        registration::Event::Invalid(count) => {
            tracing::debug!(count, "registration rejected locally");
            app.toasts.warning(FIX_FIELDS, ToastOptions::default());
            Task::none()
        }
        registration::Event::CheckEmail(email) => {
            let query = email.clone();
            request(
                app.client.as_ref(),
                |client| async move { client.check_email(&query).await },
                move |result| Message::EmailChecked {
                    email: email.clone(),
                    result,
                },
            )
        }
        registration::Event::Submit(input) => request(
            app.client.as_ref(),
            |client| async move { client.create_user(&input).await },
            Message::Registered,
        ),
    }
}

fn handle_user_list_event(app: &mut App, event: user_list::Event) -> Task<Message> {
    match event {
        user_list::Event::None => Task::none(),
        user_list::Event::Load(search) => {
            let users = request(
                app.client.as_ref(),
                |client| async move { client.list_users(search.as_deref()).await },
                Message::UsersLoaded,
            );
            Task::batch([users, load_stats(app)])
        }
        user_list::Event::Delete(id) => request(
            app.client.as_ref(),
            |client| async move { client.delete_user(&id).await },
            Message::UserDeleted,
        ),
    }
}

fn load_stats(app: &App) -> Task<Message> {
    request(
        app.client.as_ref(),
        |client| async move { client.stats().await },
        Message::StatsLoaded,
    )
}

/// Runs an API call in the background. Without a client the call fails
/// right away through the same message, so it is reported like any other
/// failure.
fn request<R, Fut>(
    client: Option<&ApiClient>,
    call: impl FnOnce(ApiClient) -> Fut,
    to_message: impl Fn(Result<R, RequestError>) -> Message + Send + 'static,
) -> Task<Message>
where
    R: Send + 'static,
    Fut: Future<Output = Result<R, RequestError>> + Send + 'static,
{
    match client.cloned() {
        Some(client) => Task::perform(call(client), to_message),
        None => Task::done(to_message(Err(RequestError::Transport(
            CLIENT_UNAVAILABLE.to_string(),
        )))),
    }
}

/// Confirms success with the server's message, falling back to `fallback`.
fn success_policy<T>(result: &Response<T>, fallback: &str) -> RequestPolicy {
    match result {
        Ok(reply) => RequestPolicy::with_success(
            reply
                .message
                .clone()
                .unwrap_or_else(|| fallback.to_string()),
        ),
        Err(_) => RequestPolicy::default(),
    }
}

fn report<T>(app: &mut App, policy: &RequestPolicy, result: &Response<T>) {
    let error_options = app.config.notifications.error_options();
    policy.report(&mut app.toasts, result, error_options);
}
