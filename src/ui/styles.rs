// SPDX-License-Identifier: MPL-2.0
//! Shared widget styles for the form and list screens.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::{button, container, text};
use iced::{Background, Border, Color, Theme};

/// Primary action (submit, search).
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    filled(theme, status, palette::PRIMARY_500, palette::PRIMARY_600)
}

/// Destructive action (delete, confirm delete).
pub fn danger(theme: &Theme, status: button::Status) -> button::Style {
    filled(theme, status, palette::ERROR_500, palette::ERROR_500)
}

fn filled(theme: &Theme, status: button::Status, base: Color, edge: Color) -> button::Style {
    let is_light = matches!(theme, Theme::Light);

    let (background, text_color, shadow) = match status {
        button::Status::Active => (base, palette::WHITE, shadow::NONE),
        button::Status::Hovered => (edge, palette::WHITE, shadow::MD),
        button::Status::Pressed => (edge, palette::WHITE, shadow::NONE),
        button::Status::Disabled => (
            if is_light {
                palette::GRAY_200
            } else {
                palette::GRAY_700
            },
            palette::GRAY_400,
            shadow::NONE,
        ),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: edge,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

/// Screen switcher tab. The active tab reads as selected.
pub fn tab(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        if active {
            return primary(theme, button::Status::Active);
        }
        let palette = theme.extended_palette();
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => palette.background.strong.color,
            _ => palette.background.weak.color,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: palette.background.base.text,
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Card surface behind the form and each list row.
pub fn panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.weak.color;

    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..base
        })),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Inline field error.
pub fn error_text(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(palette::ERROR_500),
    }
}

/// Positive inline hint ("Email is available").
pub fn success_text(_theme: &Theme) -> text::Style {
    text::Style {
        color: Some(palette::SUCCESS_500),
    }
}

/// Secondary text such as timestamps and counters.
pub fn muted_text(theme: &Theme) -> text::Style {
    let base = theme.palette().text;
    text::Style {
        color: Some(Color {
            a: opacity::OVERLAY_STRONG,
            ..base
        }),
    }
}
