// SPDX-License-Identifier: MPL-2.0
//! Registered users: search, statistics and deletion.

use crate::domain::user::{User, UserList, UserStats};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use chrono::Local;
use iced::widget::{button, container, scrollable, text_input, Column, Row, Text};
use iced::{alignment, Element, Length};

/// List screen state.
#[derive(Debug, Default)]
pub struct State {
    users: Vec<User>,
    total: usize,
    search: String,
    stats: Option<UserStats>,
    loading: bool,
    /// Id awaiting delete confirmation.
    pending_delete: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    SearchChanged(String),
    SearchSubmitted,
    Refresh,
    Delete(String),
    ConfirmDelete,
    CancelDelete,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Fetch users (optionally filtered) and statistics.
    Load(Option<String>),
    Delete(String),
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn stats(&self) -> Option<&UserStats> {
        self.stats.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Event that reloads the list with the current search.
    pub fn reload(&mut self) -> Event {
        self.loading = true;
        let search = self.search.trim();
        Event::Load((!search.is_empty()).then(|| search.to_string()))
    }

    pub fn set_users(&mut self, list: UserList) {
        self.loading = false;
        self.total = list.total;
        self.users = list.list;
    }

    pub fn set_stats(&mut self, stats: UserStats) {
        self.stats = Some(stats);
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    /// Drops a deleted user without waiting for a reload.
    pub fn remove(&mut self, id: &str) {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if self.users.len() < before {
            self.total = self.total.saturating_sub(1);
        }
        if self.pending_delete.as_deref() == Some(id) {
            self.pending_delete = None;
        }
    }
}

/// Process a list message and return the corresponding event.
pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::SearchChanged(search) => {
            state.search = search;
            Event::None
        }
        Message::SearchSubmitted | Message::Refresh => state.reload(),
        Message::Delete(id) => {
            state.pending_delete = Some(id);
            Event::None
        }
        Message::ConfirmDelete => state
            .pending_delete
            .take()
            .map_or(Event::None, Event::Delete),
        Message::CancelDelete => {
            state.pending_delete = None;
            Event::None
        }
    }
}

/// Render the list screen.
pub fn view(state: &State) -> Element<'_, Message> {
    let search = text_input("Search by name, email or message", &state.search)
        .on_input(Message::SearchChanged)
        .on_submit(Message::SearchSubmitted)
        .size(typography::BODY)
        .padding(spacing::XS)
        .width(Length::Fill);

    let refresh = button(Text::new("Search").size(typography::BODY))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding([spacing::XS, spacing::MD])
        .style(styles::primary)
        .on_press(Message::Refresh);

    let toolbar = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(search)
        .push(refresh);

    let summary = Text::new(if state.loading {
        "Loading...".to_string()
    } else {
        format!("{} users", state.total)
    })
    .size(typography::CAPTION)
    .style(styles::muted_text);

    let rows = state.users.iter().fold(
        Column::new().spacing(spacing::XS),
        |column, user| column.push(view_row(user, state.pending_delete())),
    );

    let body: Element<'_, Message> = if state.users.is_empty() && !state.loading {
        container(Text::new("No users yet").size(typography::BODY).style(styles::muted_text))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .padding(spacing::XL)
            .into()
    } else {
        scrollable(rows).height(Length::Fill).into()
    };

    Column::new()
        .spacing(spacing::SM)
        .padding(spacing::LG)
        .push(Text::new("Registered users").size(typography::TITLE_LG))
        .push(view_stats(state.stats.as_ref()))
        .push(toolbar)
        .push(summary)
        .push(body)
        .into()
}

fn view_stats(stats: Option<&UserStats>) -> Element<'_, Message> {
    let Some(stats) = stats else {
        return Column::new().into();
    };

    let tile = |label: &'static str, value: usize| {
        container(
            Column::new()
                .align_x(alignment::Horizontal::Center)
                .push(Text::new(value.to_string()).size(typography::TITLE_MD))
                .push(Text::new(label).size(typography::CAPTION).style(styles::muted_text)),
        )
        .width(Length::Fill)
        .padding(spacing::SM)
        .style(styles::panel)
    };

    Row::new()
        .spacing(spacing::XS)
        .push(tile("Total", stats.total))
        .push(tile("Today", stats.today_count))
        .push(tile("This week", stats.week_count))
        .push(tile("This month", stats.month_count))
        .into()
}

fn view_row<'a>(user: &'a User, pending_delete: Option<&str>) -> Element<'a, Message> {
    let registered = user
        .created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    let mut details = Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fill)
        .push(Text::new(user.name.as_str()).size(typography::BODY_LG))
        .push(
            Text::new(format!("{} · {registered}", user.email))
                .size(typography::CAPTION)
                .style(styles::muted_text),
        );
    if let Some(message) = user.message.as_deref() {
        details = details.push(Text::new(message).size(typography::BODY));
    }

    let actions: Element<'a, Message> = if pending_delete == Some(user.id.as_str()) {
        Row::new()
            .spacing(spacing::XXS)
            .push(
                button(Text::new("Confirm").size(typography::BODY))
                    .style(styles::danger)
                    .on_press(Message::ConfirmDelete),
            )
            .push(
                button(Text::new("Cancel").size(typography::BODY))
                    .style(styles::tab(false))
                    .on_press(Message::CancelDelete),
            )
            .into()
    } else {
        button(Text::new("Delete").size(typography::BODY))
            .style(styles::danger)
            .on_press(Message::Delete(user.id.clone()))
            .into()
    };

    container(
        Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(details)
            .push(actions),
    )
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(styles::panel)
    .into()
}
