// src/ui/sessions.rs

use chrono_tz::Tz;
use iced::widget::{button, checkbox, column, container, horizontal_space, pick_list, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

use crate::console::{ConsoleState, LoadStatus};
use crate::export::{ExportFormat, ExportScope};
use crate::generate::TeaserKind;
use crate::messages::Message;
use crate::models::{Session, Social};
use crate::ui::styles::{
    button_style, hex_color, input, panel, ButtonStyle, PanelStyle, ZEN_ACCENT, ZEN_DESTRUCTIVE, ZEN_SUBTEXT,
    ZEN_TEXT,
};
use crate::ui::{badge, empty_state, page_title, section_header};
use crate::ui_state::{FieldEdit, FilterChoice, UiState};

pub fn view<'a>(console: &'a ConsoleState, ui: &'a UiState) -> Element<'a, Message> {
    let title = console
        .event
        .as_ref()
        .map(|e| e.name.as_str())
        .unwrap_or("Sessions");
    let header = page_title(title, console.count_label());

    let mut content = column![header, filter_bar(console), query_bar(ui), action_bar(console, ui)].spacing(16);

    if ui.batch.open {
        content = content.push(batch_dialog(console, ui));
    }

    content = content.push(session_list(console));

    scrollable(content.padding([0, 10, 20, 0])).into()
}

fn filter_bar(console: &ConsoleState) -> Element<'_, Message> {
    let categories = FilterChoice::categories(&console.categories);
    let selected_category = FilterChoice::find(&categories, console.filter.category.as_deref());
    let formats = FilterChoice::formats(&console.formats);
    let selected_format = FilterChoice::find(&formats, console.filter.format.as_deref());

    let mut not_announced = row![text("Not announced on").size(14).style(ZEN_SUBTEXT)]
        .spacing(12)
        .align_items(Alignment::Center);
    for social in Social::ALL {
        let checked = console.filter.not_announced_on.contains(&social);
        not_announced = not_announced.push(
            checkbox(social.label(), checked).on_toggle(move |value| Message::NotAnnouncedOnToggled(social, value)),
        );
    }

    container(
        column![
            row![
                text_input("Search title, abstract or speaker", &console.filter.search)
                    .on_input(Message::SearchChanged)
                    .padding(10)
                    .style(input()),
                pick_list(categories, selected_category, Message::CategoryFilterSelected)
                    .placeholder("Category")
                    .padding(10),
                pick_list(formats, selected_format, Message::FormatFilterSelected)
                    .placeholder("Format")
                    .padding(10),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
            row![
                checkbox("Without speaker", console.filter.without_speaker)
                    .on_toggle(Message::WithoutSpeakerToggled),
                not_announced,
                horizontal_space(),
                if console.filter.is_active() {
                    button("Clear filters")
                        .padding([6, 12])
                        .style(button_style(ButtonStyle::Secondary))
                        .on_press(Message::ClearFilters)
                } else {
                    button("Clear filters")
                        .padding([6, 12])
                        .style(button_style(ButtonStyle::Secondary))
                },
            ]
            .spacing(20)
            .align_items(Alignment::Center),
        ]
        .spacing(12),
    )
    .padding(16)
    .style(panel(PanelStyle::Card))
    .into()
}

fn query_bar(ui: &UiState) -> Element<'_, Message> {
    row![
        text("?").size(14).style(ZEN_SUBTEXT),
        text_input("q=rust&noSpeaker=true", &ui.query_input)
            .on_input(Message::QueryChanged)
            .on_submit(Message::ApplyQuery)
            .size(13)
            .padding(6)
            .style(input()),
        button("Apply")
            .padding([6, 12])
            .style(button_style(ButtonStyle::Secondary))
            .on_press(Message::ApplyQuery),
    ]
    .spacing(8)
    .align_items(Alignment::Center)
    .into()
}

fn action_bar<'a>(console: &'a ConsoleState, ui: &'a UiState) -> Element<'a, Message> {
    let has_selection = !console.selection.is_empty() && !ui.busy;

    let action = |label: &'static str, message: Message, enabled: bool| {
        let b = button(text(label).size(14))
            .padding([8, 14])
            .style(button_style(ButtonStyle::Secondary));
        if enabled {
            b.on_press(message)
        } else {
            b
        }
    };

    let select_all = checkbox("Select all", console.is_all_selected()).on_toggle(|_| Message::ToggleSelectAll);

    row![
        select_all,
        text(format!("{} selected", console.selection.len())).size(14).style(ZEN_SUBTEXT),
        action("Clear selection", Message::ClearSelection, !console.selection.is_empty()),
        horizontal_space(),
        action("Batch edit", Message::OpenBatchDialog, has_selection),
        action("Teaser text", Message::GenerateTeasers(TeaserKind::Text), has_selection),
        action("Teaser video", Message::GenerateTeasers(TeaserKind::Video), has_selection),
        pick_list(ExportFormat::ALL.to_vec(), Some(ui.export_format), Message::ExportFormatSelected).padding(8),
        pick_list(ExportScope::ALL.to_vec(), Some(ui.export_scope), Message::ExportScopeSelected).padding(8),
        if ui.busy || console.is_loading() || console.event.is_none() {
            button("Export").padding([8, 14]).style(button_style(ButtonStyle::Primary))
        } else {
            button("Export")
                .padding([8, 14])
                .style(button_style(ButtonStyle::Primary))
                .on_press(Message::Export)
        },
    ]
    .spacing(10)
    .align_items(Alignment::Center)
    .into()
}

fn batch_dialog<'a>(console: &'a ConsoleState, ui: &'a UiState) -> Element<'a, Message> {
    let form = &ui.batch;
    let field = |label: &'static str, control: Element<'a, Message>| {
        row![text(label).size(14).style(ZEN_TEXT).width(90), control]
            .spacing(10)
            .align_items(Alignment::Center)
    };

    container(
        column![
            section_header("Batch edit"),
            text(format!("Changes apply to {} selected session(s).", console.selection.len()))
                .size(13)
                .style(ZEN_SUBTEXT),
            field(
                "Category",
                pick_list(FieldEdit::categories(&console.categories), Some(form.category.clone()), Message::BatchCategorySelected)
                    .into()
            ),
            field(
                "Format",
                pick_list(FieldEdit::formats(&console.formats), Some(form.format.clone()), Message::BatchFormatSelected).into()
            ),
            field(
                "Track",
                pick_list(FieldEdit::tracks(&console.tracks), Some(form.track.clone()), Message::BatchTrackSelected).into()
            ),
            field(
                "Width",
                text_input("columns, blank to keep", &form.width)
                    .on_input(Message::BatchWidthChanged)
                    .padding(8)
                    .style(input())
                    .into()
            ),
            field(
                "Height",
                text_input("rows, blank to keep", &form.height)
                    .on_input(Message::BatchHeightChanged)
                    .padding(8)
                    .style(input())
                    .into()
            ),
            checkbox("Reset social announcements", form.reset_teasing).on_toggle(Message::BatchResetTeasingToggled),
            row![
                horizontal_space(),
                button("Cancel")
                    .padding([8, 16])
                    .style(button_style(ButtonStyle::Destructive))
                    .on_press(Message::CloseBatchDialog),
                {
                    let apply = button(if form.confirm_pending { "Confirm" } else { "Apply" })
                        .padding([8, 16])
                        .style(button_style(ButtonStyle::Primary));
                    if ui.busy {
                        apply
                    } else {
                        apply.on_press(Message::ApplyBatch)
                    }
                },
            ]
            .spacing(10),
        ]
        .spacing(12),
    )
    .padding(20)
    .width(Length::Fill)
    .style(panel(PanelStyle::Dialog))
    .into()
}

fn session_list(console: &ConsoleState) -> Element<'_, Message> {
    match &console.status {
        LoadStatus::Idle if console.event.is_none() => {
            return empty_state("No event open", "Create or pick an event in Settings.");
        }
        LoadStatus::Loading if console.sessions.is_empty() => {
            return empty_state("Loading sessions…", "");
        }
        LoadStatus::Failed(message) => {
            return container(text(message.clone()).style(ZEN_DESTRUCTIVE))
                .padding(20)
                .width(Length::Fill)
                .style(panel(PanelStyle::Card))
                .into();
        }
        _ => {}
    }

    let displayed = console.displayed();
    if displayed.is_empty() {
        return if console.filter.is_active() {
            empty_state("No session matches", "Try clearing the filters.")
        } else {
            empty_state("No sessions yet", "Sessions of this event will show up here.")
        };
    }

    let tz = console.event.as_ref().map(|e| e.tz()).unwrap_or(chrono_tz::UTC);
    let cards: Vec<Element<'_, Message>> = displayed
        .into_iter()
        .map(|session| session_card(console, session, tz))
        .collect();

    column(cards).spacing(10).into()
}

fn session_card<'a>(console: &'a ConsoleState, session: &'a Session, tz: Tz) -> Element<'a, Message> {
    let selected = console.selection.contains(&session.id);

    let time = match (session.start, session.end) {
        (Some(start), Some(end)) => format!(
            "{} – {}",
            start.with_timezone(&tz).format("%a %d %b %H:%M"),
            end.with_timezone(&tz).format("%H:%M")
        ),
        (Some(start), None) => start.with_timezone(&tz).format("%a %d %b %H:%M").to_string(),
        _ => "Not scheduled".to_string(),
    };

    let mut meta: Vec<String> = vec![time];
    if let Some(track) = console.track_name(session.track_id.as_deref()) {
        meta.push(track.to_string());
    }
    if let Some(format) = console.format_name(session.format_id.as_deref()) {
        meta.push(format.to_string());
    }
    if let Some(minutes) = session.duration_minutes() {
        meta.push(format!("{} min", minutes));
    }

    let speakers = if session.has_speakers() {
        session.speakers.join(", ")
    } else {
        "No speaker".to_string()
    };

    let mut badges = row![].spacing(6);
    if let Some(name) = console.category_name(session.category_id.as_deref()) {
        let color = console
            .category_color(session.category_id.as_deref())
            .and_then(hex_color)
            .unwrap_or(ZEN_ACCENT);
        badges = badges.push(badge(name, color));
    }
    if session.teasing.is_announced() {
        badges = badges.push(badge("Announced", ZEN_ACCENT));
    }
    if session.teaser_text.is_some() {
        badges = badges.push(badge("Teaser", ZEN_SUBTEXT));
    }
    if session.teaser_video_url.is_some() {
        badges = badges.push(badge("Video", ZEN_SUBTEXT));
    }

    let mut announced = row![text("Announced on").size(12).style(ZEN_SUBTEXT)]
        .spacing(10)
        .align_items(Alignment::Center);
    for social in Social::ALL {
        let id = session.id.clone();
        announced = announced.push(
            checkbox(social.label(), session.teasing.is_announced_on(social))
                .size(14)
                .text_size(12)
                .on_toggle(move |value| Message::AnnouncedToggled(id.clone(), social, value)),
        );
    }

    let id = session.id.clone();
    container(
        row![
            checkbox("", selected).on_toggle(move |_| Message::SessionToggled(id.clone())),
            column![
                row![text(&session.title).size(16).style(ZEN_TEXT), horizontal_space(), badges]
                    .align_items(Alignment::Center),
                text(meta.join(" · ")).size(12).style(ZEN_SUBTEXT),
                text(speakers).size(12).style(if session.has_speakers() { ZEN_TEXT } else { ZEN_SUBTEXT }),
                announced,
            ]
            .spacing(4),
        ]
        .spacing(12)
        .align_items(Alignment::Center),
    )
    .padding(14)
    .width(Length::Fill)
    .style(panel(if selected { PanelStyle::SelectedCard } else { PanelStyle::Card }))
    .into()
}
