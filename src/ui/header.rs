use iced::widget::{column, horizontal_space, row, text};
use iced::{Alignment, Element};

use super::style;
use crate::state::session::Session;
use crate::Message;

/// Title, subtitle and the time of the last live refresh
pub fn view<'a>(session: &Session) -> Element<'a, Message> {
    let updated = session
        .refresh_token()
        .refreshed_at()
        .format("%H:%M:%S")
        .to_string();

    let counts = if session.catalog().is_ready() {
        format!(
            "{} of {} cameras",
            session.visible().len(),
            session.catalog().records().len()
        )
    } else {
        String::new()
    };

    column![
        text("Toronto Traffic").size(40),
        row![
            text("Live view of traffic cameras across the city")
                .size(16)
                .color(style::MUTED),
            horizontal_space(),
            text(counts).size(13).color(style::MUTED),
            text(format!("Updated {}", updated))
                .size(13)
                .color(style::ACCENT),
        ]
        .spacing(16)
        .align_y(Alignment::Center),
    ]
    .spacing(6)
    .into()
}
