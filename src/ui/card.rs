use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use super::style;
use crate::state::cards::CardView;
use crate::state::data::CameraRecord;
use crate::Message;

pub const CARD_WIDTH: f32 = 320.0;
const IMAGE_HEIGHT: f32 = 200.0;

/// One camera card. `opacity` comes from the staggered entrance.
pub fn view<'a>(record: &'a CameraRecord, picture: CardView<'a>, opacity: f32) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match picture {
        CardView::Image { snapshot, refreshing } => {
            // Slight dim while the next frame is on its way
            let alpha = if refreshing { 0.85 } else { 1.0 };
            image(snapshot.handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(IMAGE_HEIGHT))
                .content_fit(ContentFit::Cover)
                .opacity(alpha * opacity)
                .into()
        }
        CardView::Loading => placeholder("Loading...", opacity),
        CardView::Offline => placeholder("Camera Offline", opacity),
    };

    let title = row![
        text(record.title()).size(16).color(style::faded(iced::Color::WHITE, opacity)),
        text(record.direction_label())
            .size(13)
            .color(style::faded(style::ACCENT, opacity)),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    let subtitle = text(record.subtitle())
        .size(13)
        .color(style::faded(style::MUTED, opacity));

    let body = column![picture, column![title, subtitle].spacing(4).padding(12)];

    button(
        container(body)
            .width(Length::Fixed(CARD_WIDTH))
            .clip(true)
            .style(move |theme| style::card(theme, opacity)),
    )
    .padding(0)
    .style(button::text)
    .on_press(Message::OpenViewer(record.id))
    .into()
}

fn placeholder<'a>(label: &'a str, opacity: f32) -> Element<'a, Message> {
    container(text(label).size(14).color(style::faded(style::MUTED, opacity)))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(IMAGE_HEIGHT))
        .style(style::placeholder)
        .into()
}
