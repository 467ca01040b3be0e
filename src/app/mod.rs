// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the registration form,
//! the user list and the toast layer.
//!
//! The `App` owns the [`Toasts`] manager and hands it by `&mut` to whatever
//! needs to raise a toast, most notably the request policy that turns failed
//! API calls into error toasts.

mod message;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message, Response};
pub use screen::Screen;

use crate::config::Config;
use crate::infrastructure::api_client::ApiClient;
use crate::ui::notifications::{Overlay, ToastOptions, Toasts};
use crate::ui::{registration, user_list};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

pub const APP_TITLE: &str = "Signup Desk";

/// Root Iced application state.
pub struct App {
    config: Config,
    /// `None` when the HTTP client could not be built; requests then fail
    /// with an error toast.
    client: Option<ApiClient>,
    screen: Screen,
    registration: registration::State,
    users: user_list::State,
    toasts: Toasts<Overlay>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("toasts", &self.toasts.list().len())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 520;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from the loaded configuration.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags {
            config,
            config_warning,
        } = flags;

        let mut toasts =
            Toasts::new(Overlay::new()).with_defaults(config.notifications.toast_defaults());

        let client = match ApiClient::new(&config.client) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::error!(error = %err, "failed to build HTTP client");
                toasts.error(err.to_string(), config.notifications.error_options());
                None
            }
        };

        if let Some(warning) = config_warning {
            toasts.warning(warning, ToastOptions::default());
        }

        let app = App {
            config,
            client,
            screen: Screen::default(),
            registration: registration::State::new(),
            users: user_list::State::new(),
            toasts,
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        format!("{} - {APP_TITLE}", self.screen.label())
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(self.toasts.needs_tick())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            screen: self.screen,
            registration: &self.registration,
            users: &self.users,
            toasts: self.toasts.target(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LOAD_WARNING;
    use crate::domain::user::{FieldError, User, UserList, UserStats};
    use crate::infrastructure::api_client::{Reply, RequestError};
    use crate::ui::notifications::{Anchor, Category, ToastMessage};
    use chrono::Utc;

    fn app() -> App {
        App::new(Flags::default()).0
    }

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            message: Some("Hello from the analytical engine".to_string()),
            created_at: Utc::now(),
        }
    }

    fn reply<T>(data: T, message: &str) -> Response<T> {
        Ok(Reply {
            data,
            message: Some(message.to_string()),
        })
    }

    fn categories(app: &App) -> Vec<Category> {
        app.toasts.list().iter().map(|t| t.category()).collect()
    }

    #[test]
    fn new_starts_on_register_without_toasts() {
        let app = app();
        assert_eq!(app.screen, Screen::Register);
        assert!(app.toasts.list().is_empty());
        assert!(app.client.is_some());
        assert_eq!(app.title(), "Register - Signup Desk");
    }

    #[test]
    fn config_warning_is_shown_as_toast() {
        let (app, _) = App::new(Flags {
            config: Config::default(),
            config_warning: Some(LOAD_WARNING.to_string()),
        });
        let list = app.toasts.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category(), Category::Warning);
        assert_eq!(list[0].message(), LOAD_WARNING);
    }

    #[test]
    fn registration_success_shows_server_message_and_resets_form() {
        let mut app = app();
        let _ = app.update(Message::Registered(reply(user("a"), "Thanks for registering!")));

        let list = app.toasts.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category(), Category::Success);
        assert_eq!(list[0].message(), "Thanks for registering!");
        assert!(!app.registration.is_submitting());
    }

    #[test]
    fn failed_request_raises_error_toast_with_configured_options() {
        let mut app = app();
        let _ = app.update(Message::Registered(Err(RequestError::Status {
            status: 409,
            message: "This email is already registered".to_string(),
            errors: vec![FieldError::new("email", "taken")],
        })));

        let list = app.toasts.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].category(), Category::Error);
        assert_eq!(list[0].duration_ms(), 4000);
        assert_eq!(list[0].anchor(), Anchor::TopRight);
        assert_eq!(app.registration.field_error("email"), Some("taken"));
    }

    #[test]
    fn network_failure_uses_no_response_message() {
        let mut app = app();
        let _ = app.update(Message::UsersLoaded(Err(RequestError::NoResponse)));

        assert_eq!(app.toasts.list()[0].message(), "The server did not respond");
        assert!(!app.users.is_loading());
    }

    #[test]
    fn taken_email_warns() {
        let mut app = app();
        let _ = app.update(Message::Registration(registration::Message::EmailChanged(
            "ada@example.com".to_string(),
        )));
        let _ = app.update(Message::EmailChecked {
            email: "ada@example.com".to_string(),
            result: reply(false, "Email is already in use"),
        });

        assert_eq!(categories(&app), vec![Category::Warning]);
        assert_eq!(
            app.registration.email_status(),
            registration::EmailStatus::Taken
        );
    }

    #[test]
    fn invalid_submit_warns_without_request() {
        let mut app = app();
        let _ = app.update(Message::Registration(registration::Message::Submit));

        assert_eq!(categories(&app), vec![Category::Warning]);
        assert!(!app.registration.is_submitting());
    }

    #[test]
    fn users_and_stats_fill_the_list_screen() {
        let mut app = app();
        let _ = app.update(Message::SwitchScreen(Screen::Users));
        assert!(app.users.is_loading());

        let _ = app.update(Message::UsersLoaded(reply(
            UserList::from(vec![user("a"), user("b")]),
            "",
        )));
        let _ = app.update(Message::StatsLoaded(reply(
            UserStats {
                total: 2,
                today_count: 2,
                week_count: 2,
                month_count: 2,
            },
            "Statistics loaded",
        )));

        assert_eq!(app.users.total(), 2);
        assert_eq!(app.users.stats().map(|s| s.total), Some(2));
        assert!(app.toasts.list().is_empty());
    }

    #[test]
    fn delete_success_removes_row() {
        let mut app = app();
        let _ = app.update(Message::UsersLoaded(reply(
            UserList::from(vec![user("a"), user("b")]),
            "",
        )));
        let _ = app.update(Message::UserDeleted(reply(
            user("a"),
            "User Ada Lovelace has been deleted",
        )));

        assert_eq!(app.users.total(), 1);
        assert_eq!(categories(&app), vec![Category::Success]);
    }

    #[test]
    fn toast_click_dismisses() {
        let mut app = app();
        let _ = app.update(Message::UsersLoaded(Err(RequestError::NoResponse)));
        let id = app.toasts.list()[0].id();

        let _ = app.update(Message::Toast(ToastMessage::Dismiss(id)));
        assert!(app.toasts.list().is_empty());
    }

    #[test]
    fn toast_tick_keeps_unexpired_toasts() {
        let mut app = app();
        let _ = app.update(Message::UsersLoaded(Err(RequestError::NoResponse)));

        let _ = app.update(Message::Toast(ToastMessage::Tick));
        assert_eq!(app.toasts.list().len(), 1);
        assert!(app.toasts.needs_tick());
    }
}
