use iced::keyboard::{self, key::Named, Key};
use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row, stack,
    text,
};
use iced::{Alignment, ContentFit, Element, Length};

use super::style;
use crate::state::cards::CardView;
use crate::state::data::CameraRecord;
use crate::Message;

/// Keys understood while the viewer is open.
/// Only subscribed to while it is open, so these never fire otherwise.
pub fn key_binding(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        Key::Named(Named::Escape) => Some(Message::CloseViewer),
        Key::Named(Named::ArrowRight) => Some(Message::NextCamera),
        Key::Named(Named::ArrowLeft) => Some(Message::PrevCamera),
        _ => None,
    }
}

/// The viewer drawn over `base`. Clicking the dimmed backdrop closes it;
/// clicks on the panel itself do not.
pub fn overlay<'a>(
    base: Element<'a, Message>,
    record: &'a CameraRecord,
    picture: CardView<'a>,
) -> Element<'a, Message> {
    let close = button(text("×").size(28))
        .on_press(Message::CloseViewer)
        .style(button::text);
    let prev = button(text("‹").size(48))
        .on_press(Message::PrevCamera)
        .style(button::text);
    let next = button(text("›").size(48))
        .on_press(Message::NextCamera)
        .style(button::text);

    let heading = column![
        text(record.title()).size(28),
        text(record.subtitle()).size(16).color(style::MUTED),
    ]
    .spacing(4);

    let top = row![heading, horizontal_space(), close].align_y(Alignment::Start);

    // The previous frame stays up until the refreshed one is decoded
    let frame: Element<'a, Message> = match picture {
        CardView::Image { snapshot, .. } => image(snapshot.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        CardView::Loading => center(text("Loading...").color(style::MUTED)).into(),
        CardView::Offline => center(text("Camera Offline").color(style::MUTED)).into(),
    };

    let middle = row![prev, frame, next]
        .spacing(12)
        .align_y(Alignment::Center)
        .height(Length::Fill);

    let panel = container(column![top, middle].spacing(16))
        .padding(24)
        .max_width(1200.0)
        .style(style::modal);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(panel)).padding(40).style(style::backdrop))
                .on_press(Message::CloseViewer)
        )
    ]
    .into()
}
