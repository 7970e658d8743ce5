use std::time::Instant;

use iced::widget::{button, center, column, scrollable, text};
use iced::{Alignment, Element, Length, Pixels};
use iced_aw::Wrap;

use super::{card, style};
use crate::state::reveal::Reveal;
use crate::state::session::Session;
use crate::Message;

/// What the grid area shows, before any widget is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridStatus {
    Loading,
    Failed(String),
    /// The fetch worked but the service has no cameras
    NoCameras,
    /// Cameras exist but none match the search
    NoMatches(String),
    Cards,
}

impl GridStatus {
    pub fn of(session: &Session) -> Self {
        let catalog = session.catalog();
        if catalog.is_loading() {
            GridStatus::Loading
        } else if let Some(error) = catalog.error() {
            GridStatus::Failed(error.to_string())
        } else if catalog.records().is_empty() {
            GridStatus::NoCameras
        } else if session.visible().is_empty() {
            GridStatus::NoMatches(session.search_term().to_string())
        } else {
            GridStatus::Cards
        }
    }
}

/// The card grid, or the message standing in for it
pub fn view<'a>(session: &'a Session, reveal: &Reveal, now: Instant) -> Element<'a, Message> {
    match GridStatus::of(session) {
        GridStatus::Loading => message("Loading cameras...".to_string(), style::MUTED),
        GridStatus::Failed(error) => center(
            column![
                text(error).size(16).color(style::ERROR),
                button("Retry").on_press(Message::Retry).padding(10),
            ]
            .spacing(16)
            .align_x(Alignment::Center),
        )
        .into(),
        GridStatus::NoCameras => message(
            "No cameras are available right now.".to_string(),
            style::MUTED,
        ),
        GridStatus::NoMatches(term) => {
            message(format!("No cameras match \"{}\".", term), style::MUTED)
        }
        GridStatus::Cards => {
            let cards: Vec<Element<'a, Message>> = session
                .visible()
                .iter()
                .enumerate()
                .map(|(index, record)| {
                    card::view(record, session.card_view(record), reveal.opacity(index, now))
                })
                .collect();

            scrollable(
                Wrap::with_elements(cards)
                    .spacing(Pixels(16.0))
                    .line_spacing(Pixels(16.0)),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
        }
    }
}

fn message<'a>(label: String, color: iced::Color) -> Element<'a, Message> {
    center(text(label).size(16).color(color)).into()
}
