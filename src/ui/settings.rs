// src/ui/settings.rs

use std::path::Path;

use iced::widget::{button, checkbox, column, container, horizontal_rule, pick_list, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

use crate::export::ExportFormat;
use crate::messages::Message;
use crate::models::{Event, Settings};
use crate::ui::section_header;
use crate::ui::styles::{button_style, input, panel, ButtonStyle, PanelStyle, ZEN_SUBTEXT, ZEN_TEXT};
use crate::ui_state::UiState;

pub fn view<'a>(
    settings: &'a Settings,
    events: &'a [Event],
    current: Option<&'a Event>,
    ui: &'a UiState,
    export_dir: &Path,
) -> Element<'a, Message> {
    let label = |value: &'static str| text(value).size(14).style(ZEN_TEXT);

    let event_picker = row![
        label("Open event"),
        pick_list(events, current.cloned(), Message::EventSelected)
            .placeholder("Choose an event")
            .padding(8),
        button("Reload")
            .padding([8, 14])
            .style(button_style(ButtonStyle::Secondary))
            .on_press(Message::Reload),
    ]
    .spacing(10)
    .align_items(Alignment::Center);

    let new_event = column![
        text("New event").size(14).style(ZEN_TEXT),
        text_input("Event name", &ui.new_event_name)
            .on_input(Message::NewEventNameChanged)
            .padding(10)
            .style(input()),
        text_input("Timezone, e.g. Europe/Paris", &ui.new_event_timezone)
            .on_input(Message::NewEventTimezoneChanged)
            .on_submit(Message::CreateEvent)
            .padding(10)
            .style(input()),
        if ui.new_event_name.trim().is_empty() || ui.busy {
            button("Create event").padding([10, 20]).style(button_style(ButtonStyle::Primary))
        } else {
            button("Create event")
                .padding([10, 20])
                .style(button_style(ButtonStyle::Primary))
                .on_press(Message::CreateEvent)
        },
    ]
    .spacing(10);

    let events_section = container(
        column![section_header("Events"), event_picker, horizontal_rule(10), new_event].spacing(20),
    )
    .style(panel(PanelStyle::Card))
    .padding(20)
    .width(Length::Fill);

    let default_format = settings.default_export_format.parse::<ExportFormat>().ok();

    let preferences_section = container(
        column![
            section_header("Preferences"),
            row![
                label("Default export format"),
                pick_list(ExportFormat::ALL.to_vec(), default_format, Message::DefaultExportFormatSelected).padding(8),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
            row![
                label("Fallback timezone"),
                text_input("UTC", &settings.default_timezone)
                    .on_input(Message::DefaultTimezoneChanged)
                    .padding(8)
                    .width(240)
                    .style(input()),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
            row![
                label("Schedule slot (minutes)"),
                text_input("30", &settings.slot_minutes_hint.to_string())
                    .on_input(Message::SlotMinutesChanged)
                    .padding(8)
                    .width(80)
                    .style(input()),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
            checkbox("Ask before applying batch edits", settings.confirm_batch_edits)
                .on_toggle(Message::ConfirmBatchToggled),
            text(format!("Exports are saved to {}", export_dir.display()))
                .size(12)
                .style(ZEN_SUBTEXT),
        ]
        .spacing(20),
    )
    .style(panel(PanelStyle::Card))
    .padding(20)
    .width(Length::Fill);

    scrollable(
        column![
            events_section,
            preferences_section,
            button("Save All Changes")
                .on_press(Message::SaveSettings)
                .width(Length::Fill)
                .padding(15)
                .style(button_style(ButtonStyle::Primary)),
        ]
        .spacing(20)
        .padding([0, 10, 20, 0]),
    )
    .into()
}
