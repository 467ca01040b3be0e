// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::ui::notifications::ToastMessage;
use iced::{time, Subscription};
use std::time::Duration;

/// Tick period while toasts are on screen. Short enough for the 300 ms
/// fades to look smooth.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Ticks only while the toast layer has timers or transitions to advance.
pub fn create_tick_subscription(needs_tick: bool) -> Subscription<Message> {
    if needs_tick {
        time::every(TICK_INTERVAL).map(|_| Message::Toast(ToastMessage::Tick))
    } else {
        Subscription::none()
    }
}
