// SPDX-License-Identifier: MPL-2.0
//! Registration form.
//!
//! The form validates locally with the same rules the server applies, so
//! most mistakes are shown inline before a request is made. The server's
//! field errors replace the local ones when a submit is rejected.

use crate::domain::user::validation::{self, MESSAGE_MAX_CHARS};
use crate::domain::user::{CreateUserInput, FieldError};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, text, text_editor, text_input, Column, Row, Text};
use iced::{alignment, Element, Length};

/// Result of the last availability check for the typed email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailStatus {
    #[default]
    Unchecked,
    Checking,
    Available,
    Taken,
}

/// Form state.
#[derive(Debug, Default)]
pub struct State {
    name: String,
    email: String,
    message: text_editor::Content,
    errors: Vec<FieldError>,
    email_status: EmailStatus,
    submitting: bool,
}

/// Messages emitted by the form widgets.
#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    EmailChanged(String),
    /// Enter pressed in the email field.
    EmailCommitted,
    MessageEdited(text_editor::Action),
    Submit,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Ask the server whether this (normalized) email is free.
    CheckEmail(String),
    /// Local validation passed; send the registration.
    Submit(CreateUserInput),
    /// Local validation failed with this many field errors.
    Invalid(usize),
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field values as a request payload.
    #[must_use]
    pub fn input(&self) -> CreateUserInput {
        CreateUserInput {
            name: self.name.clone(),
            email: self.email.clone(),
            // The editor always ends its text with a newline.
            message: self.message.text().trim_end_matches('\n').to_string(),
        }
    }

    /// First error reported for `field`, if any.
    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn email_status(&self) -> EmailStatus {
        self.email_status
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Records the availability answer. A stale answer for an email the user
    /// has since edited is ignored.
    pub fn email_checked(&mut self, email: &str, available: Option<bool>) {
        if validation::normalize_email(&self.email) != email {
            return;
        }
        self.email_status = match available {
            Some(true) => EmailStatus::Available,
            Some(false) => EmailStatus::Taken,
            None => EmailStatus::Unchecked,
        };
    }

    /// The server accepted the registration: start over with an empty form.
    pub fn submit_succeeded(&mut self) {
        *self = Self::default();
    }

    /// The server rejected the registration with these field errors.
    pub fn submit_failed(&mut self, errors: &[FieldError]) {
        self.submitting = false;
        if !errors.is_empty() {
            self.errors = errors.to_vec();
        }
    }

    fn clear_error(&mut self, field: &str) {
        self.errors.retain(|e| e.field != field);
    }

    fn message_len(&self) -> usize {
        self.message.text().trim().chars().count()
    }
}

/// Process a form message and return the corresponding event.
pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::NameChanged(name) => {
            state.name = name;
            state.clear_error("name");
            Event::None
        }
        Message::EmailChanged(email) => {
            state.email = email;
            state.email_status = EmailStatus::Unchecked;
            state.clear_error("email");
            Event::None
        }
        Message::EmailCommitted => {
            let email = validation::normalize_email(&state.email);
            if !validation::is_valid_email(&email) {
                state.clear_error("email");
                state
                    .errors
                    .push(FieldError::new("email", "Please enter a valid email address"));
                return Event::None;
            }
            state.email_status = EmailStatus::Checking;
            Event::CheckEmail(email)
        }
        Message::MessageEdited(action) => {
            let is_edit = action.is_edit();
            state.message.perform(action);
            if is_edit {
                state.clear_error("message");
            }
            Event::None
        }
        Message::Submit => {
            if state.submitting {
                return Event::None;
            }
            let input = state.input();
            match validation::validate_create(&input) {
                Ok(_) if state.email_status == EmailStatus::Taken => {
                    state.errors = vec![FieldError::new(
                        "email",
                        crate::application::user_service::EMAIL_TAKEN,
                    )];
                    Event::Invalid(1)
                }
                Ok(_) => {
                    state.errors.clear();
                    state.submitting = true;
                    Event::Submit(input)
                }
                Err(errors) => {
                    let count = errors.len();
                    state.errors = errors;
                    Event::Invalid(count)
                }
            }
        }
    }
}

/// Render the form.
pub fn view(state: &State) -> Element<'_, Message> {
    let title = Text::new("Register").size(typography::TITLE_LG);

    let name = text_input("Your name", &state.name)
        .on_input(Message::NameChanged)
        .on_submit(Message::Submit)
        .size(typography::BODY_LG)
        .padding(spacing::XS);

    let email = text_input("you@example.com", &state.email)
        .on_input(Message::EmailChanged)
        .on_submit(Message::EmailCommitted)
        .size(typography::BODY_LG)
        .padding(spacing::XS);

    let message = text_editor(&state.message)
        .placeholder("Tell us a little about yourself")
        .on_action(Message::MessageEdited)
        .size(typography::BODY_LG)
        .padding(spacing::XS)
        .height(Length::Fixed(120.0));

    let counter = Text::new(format!("{}/{MESSAGE_MAX_CHARS}", state.message_len()))
        .size(typography::CAPTION)
        .style(styles::muted_text);

    let mut submit = button(
        Text::new(if state.submitting {
            "Submitting..."
        } else {
            "Submit"
        })
        .size(typography::BODY),
    )
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .padding([spacing::XS, spacing::MD])
    .style(styles::primary);
    if !state.submitting {
        submit = submit.on_press(Message::Submit);
    }

    let email_hint: Element<'_, Message> = match (state.field_error("email"), state.email_status) {
        (Some(error), _) => error_line(error),
        (None, EmailStatus::Checking) => Text::new("Checking...")
            .size(typography::CAPTION)
            .style(styles::muted_text)
            .into(),
        (None, EmailStatus::Available) => Text::new("Email is available")
            .size(typography::CAPTION)
            .style(styles::success_text)
            .into(),
        (None, EmailStatus::Taken) => error_line(crate::application::user_service::EMAIL_TAKEN),
        (None, EmailStatus::Unchecked) => Column::new().into(),
    };

    let form = Column::new()
        .spacing(spacing::SM)
        .push(title)
        .push(field("Name", name, state.field_error("name")))
        .push(
            Column::new()
                .spacing(spacing::XXS)
                .push(Text::new("Email").size(typography::BODY))
                .push(email)
                .push(email_hint),
        )
        .push(
            Column::new()
                .spacing(spacing::XXS)
                .push(Text::new("Message").size(typography::BODY))
                .push(message)
                .push(
                    Row::new()
                        .push(
                            state
                                .field_error("message")
                                .map_or_else(|| Column::new().into(), error_line),
                        )
                        .push(
                            container(counter)
                                .width(Length::Fill)
                                .align_x(alignment::Horizontal::Right),
                        ),
                ),
        )
        .push(submit);

    container(
        container(form)
            .width(Length::Fixed(sizing::FORM_WIDTH))
            .padding(spacing::LG)
            .style(styles::panel),
    )
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .padding(spacing::LG)
    .into()
}

fn field<'a>(
    label: &'a str,
    input: impl Into<Element<'a, Message>>,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(label).size(typography::BODY))
        .push(input);
    if let Some(error) = error {
        column = column.push(error_line(error));
    }
    column.into()
}

fn error_line(message: &str) -> Element<'_, Message> {
    text(message)
        .size(typography::CAPTION)
        .style(styles::error_text)
        .into()
}
