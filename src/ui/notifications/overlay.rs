// SPDX-License-Identifier: MPL-2.0
//! Iced surface for toasts.
//!
//! [`Overlay`] is the [`RenderTarget`] used by the desktop app. It keeps the
//! mounted nodes per anchor and turns them into a layer that is stacked on
//! top of the main view: one column per anchor, each aligned to its corner
//! or edge, so groups never overlap each other.

use super::manager::Message;
use super::renderer::{RenderTarget, ToastNode};
use super::toast::{Anchor, Category, ToastId};
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{button, container, mouse_area, text, Column, Container, Row, Stack, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};
use std::time::Instant;

/// Mounted toast nodes, one stack per anchor.
#[derive(Debug, Default)]
pub struct Overlay {
    groups: [Vec<ToastNode>; 6],
}

impl Overlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes mounted at `anchor`, oldest first.
    #[must_use]
    pub fn group(&self, anchor: Anchor) -> &[ToastNode] {
        &self.groups[anchor.index()]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// Renders every non-empty anchor group as one overlay layer.
    pub fn view(&self, now: Instant) -> Element<'_, Message> {
        let layers: Vec<Element<'_, Message>> = Anchor::ALL
            .iter()
            .filter(|anchor| !self.group(**anchor).is_empty())
            .map(|&anchor| view_group(anchor, self.group(anchor), now))
            .collect();

        if layers.is_empty() {
            // Empty container that takes no space
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            Stack::with_children(layers)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        }
    }
}

impl RenderTarget for Overlay {
    fn mount(&mut self, node: &ToastNode) {
        self.groups[node.anchor.index()].push(node.clone());
    }

    fn update(&mut self, node: &ToastNode) {
        if let Some(slot) = self.groups[node.anchor.index()]
            .iter_mut()
            .find(|n| n.id == node.id)
        {
            *slot = node.clone();
        }
    }

    fn unmount(&mut self, id: ToastId, anchor: Anchor) {
        self.groups[anchor.index()].retain(|n| n.id != id);
    }
}

/// Lays out one anchor's toasts as a column pinned to that anchor.
fn view_group<'a>(anchor: Anchor, nodes: &'a [ToastNode], now: Instant) -> Element<'a, Message> {
    let (align_x, align_y) = placement(anchor);

    // Bottom anchors grow upwards: the oldest toast sits closest to the edge.
    let toasts: Vec<Element<'a, Message>> = if anchor.is_top() {
        nodes.iter().map(|node| view_toast(node, now)).collect()
    } else {
        nodes.iter().rev().map(|node| view_toast(node, now)).collect()
    };

    let column = Column::with_children(toasts)
        .spacing(spacing::XS)
        .align_x(align_x);

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(align_x)
        .align_y(align_y)
        .padding(spacing::MD)
        .into()
}

/// Renders a single toast.
fn view_toast(node: &ToastNode, now: Instant) -> Element<'_, Message> {
    let alpha = node.opacity(now);
    let accent = fade(category_color(node.category), alpha);

    let icon = Text::new(node.category.icon())
        .size(typography::BODY_LG)
        .style(move |_theme: &Theme| text::Style {
            color: Some(accent),
        });

    let message = Text::new(node.message.as_str())
        .size(typography::BODY)
        .style(move |theme: &Theme| text::Style {
            color: Some(fade(theme.palette().text, alpha)),
        });

    let mut dismiss = button(Text::new("×").size(typography::BODY_LG))
        .padding(spacing::XXS)
        .style(dismiss_button_style);
    if node.is_interactive() {
        dismiss = dismiss.on_press(Message::Dismiss(node.id));
    }

    // Layout: [icon] [message] [dismiss]
    let content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Container::new(icon).padding(spacing::XXS))
        .push(
            Container::new(message)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        )
        .push(dismiss);

    let card = Container::new(content)
        .width(Length::Fixed(sizing::TOAST_WIDTH))
        .padding(spacing::SM)
        .style(move |theme: &Theme| toast_container_style(theme, accent, alpha));

    // Clicking anywhere on the toast dismisses it.
    if node.is_interactive() {
        mouse_area(card).on_press(Message::Dismiss(node.id)).into()
    } else {
        card.into()
    }
}

fn placement(anchor: Anchor) -> (alignment::Horizontal, alignment::Vertical) {
    use alignment::{Horizontal, Vertical};
    match anchor {
        Anchor::TopLeft => (Horizontal::Left, Vertical::Top),
        Anchor::TopRight => (Horizontal::Right, Vertical::Top),
        Anchor::TopCenter => (Horizontal::Center, Vertical::Top),
        Anchor::BottomLeft => (Horizontal::Left, Vertical::Bottom),
        Anchor::BottomRight => (Horizontal::Right, Vertical::Bottom),
        Anchor::BottomCenter => (Horizontal::Center, Vertical::Bottom),
    }
}

/// Accent color for a category.
#[must_use]
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Success => palette::SUCCESS_500,
        Category::Error => palette::ERROR_500,
        Category::Warning => palette::WARNING_500,
        Category::Info => palette::INFO_500,
    }
}

fn fade(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent: Color, alpha: f32) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(Background::Color(fade(bg_color, alpha))),
        border: Border {
            color: accent,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: iced::Shadow {
            color: fade(shadow::MD.color, alpha * opacity::OVERLAY_MEDIUM),
            ..shadow::MD
        },
        text_color: Some(fade(theme.palette().text, alpha)),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    let background = match status {
        button::Status::Hovered => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        })),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background,
        text_color: base.text,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
