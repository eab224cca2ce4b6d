// src/ui/mod.rs

use iced::widget::{container, text};
use iced::{Color, Element};

use crate::messages::Message;

pub mod schedule;
pub mod sessions;
pub mod settings;
pub mod styles;

use styles::{panel, PanelStyle, ZEN_ACCENT, ZEN_SUBTEXT, ZEN_TEXT};

// Helper for section headers
pub fn section_header(label: &str) -> Element<'_, Message> {
    text(label).size(20).style(ZEN_ACCENT).into()
}

pub fn page_title<'a>(title: &str, subtitle: String) -> Element<'a, Message> {
    iced::widget::column![
        text(title).size(28).style(ZEN_TEXT),
        text(subtitle).size(14).style(ZEN_SUBTEXT),
    ]
    .spacing(4)
    .into()
}

pub fn badge<'a>(label: impl ToString, color: Color) -> Element<'a, Message> {
    container(text(label).size(10).style(color))
        .padding([4, 8])
        .style(panel(PanelStyle::Badge(color)))
        .into()
}

/// Placeholder shown when a view has nothing to list.
pub fn empty_state<'a>(title: &str, hint: &str) -> Element<'a, Message> {
    container(
        iced::widget::column![
            text(title.to_string()).size(18).style(ZEN_TEXT),
            text(hint.to_string()).size(14).style(ZEN_SUBTEXT),
        ]
        .spacing(8)
        .align_items(iced::Alignment::Center),
    )
    .width(iced::Length::Fill)
    .padding(40)
    .center_x()
    .style(panel(PanelStyle::Card))
    .into()
}
