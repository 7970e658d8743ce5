use iced::widget::{pick_list, row, text_input};
use iced::{Alignment, Element, Length};

use crate::state::data::SortKey;
use crate::Message;

/// Search box and sort selector
pub fn view<'a>(search_term: &str, sort_key: SortKey) -> Element<'a, Message> {
    let search = text_input("Search road name...", search_term)
        .on_input(Message::SearchChanged)
        .padding(10)
        .width(Length::Fixed(300.0));

    let sort = pick_list(SortKey::ALL, Some(sort_key), Message::SortSelected).padding(10);

    row![search, sort]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
}
