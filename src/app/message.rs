// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::config::Config;
use crate::domain::user::{User, UserList, UserStats};
use crate::infrastructure::api_client::{Reply, RequestError};
use crate::ui::notifications::ToastMessage;
use crate::ui::{registration, user_list};
use super::Screen;

/// Outcome of an API call, as delivered back to `App::update`.
pub type Response<T> = Result<Reply<T>, RequestError>;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    SwitchScreen(Screen),
    Registration(registration::Message),
    UserList(user_list::Message),
    Toast(ToastMessage),
    /// Answer to an availability check for `email`.
    EmailChecked {
        email: String,
        result: Response<bool>,
    },
    Registered(Response<User>),
    UsersLoaded(Response<UserList>),
    StatsLoaded(Response<UserStats>),
    UserDeleted(Response<User>),
}

/// Runtime state handed over by `main.rs`, which has already loaded the
/// configuration to set up logging.
#[derive(Debug, Default)]
pub struct Flags {
    pub config: Config,
    /// Warning from loading `settings.toml`, shown as a toast on startup.
    pub config_warning: Option<String>,
}
