// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The active screen sits below a tab bar; the toast overlay is stacked on
//! top of everything so toasts never shift the layout.

use super::{Message, Screen};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::notifications::Overlay;
use crate::ui::{registration, styles, user_list};
use iced::widget::{button, Column, Container, Row, Stack, Text};
use iced::{Element, Length};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub screen: Screen,
    pub registration: &'a registration::State,
    pub users: &'a user_list::State,
    pub toasts: &'a Overlay,
}

/// Renders the current screen with the toast layer on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let current_view: Element<'_, Message> = match ctx.screen {
        Screen::Register => registration::view(ctx.registration).map(Message::Registration),
        Screen::Users => user_list::view(ctx.users).map(Message::UserList),
    };

    let column = Column::new().push(view_tabs(ctx.screen)).push(
        Container::new(current_view)
            .width(Length::Fill)
            .height(Length::Fill),
    );

    let toasts = ctx.toasts.view(Instant::now()).map(Message::Toast);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(column)
        .push(toasts)
        .into()
}

fn view_tabs(active: Screen) -> Element<'static, Message> {
    Screen::ALL
        .iter()
        .fold(
            Row::new().spacing(spacing::XS).padding(spacing::SM),
            |row, &screen| {
                row.push(
                    button(Text::new(screen.label()).size(typography::BODY))
                        .padding([spacing::XXS, spacing::MD])
                        .style(styles::tab(screen == active))
                        .on_press(Message::SwitchScreen(screen)),
                )
            },
        )
        .into()
}
