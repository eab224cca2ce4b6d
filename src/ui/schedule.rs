// src/ui/schedule.rs

use iced::widget::{column, container, horizontal_space, pick_list, row, scrollable, text, Space};
use iced::{Alignment, Color, Element, Length};

use crate::console::ConsoleState;
use crate::messages::Message;
use crate::models::Session;
use crate::schedule::{days, ScheduleGrid, Slot, UnplacedReason};
use crate::ui::styles::{hex_color, panel, PanelStyle, ZEN_ACCENT, ZEN_SUBTEXT, ZEN_TEXT};
use crate::ui::{empty_state, page_title, section_header};
use crate::ui_state::UiState;

const TIME_WIDTH: f32 = 64.0;
const COLUMN_WIDTH: f32 = 180.0;
const GAP: f32 = 6.0;

/// Row height for the configured slot length, 72px for 30 minutes.
fn row_height(slot_minutes: i32) -> f32 {
    slot_minutes.clamp(15, 120) as f32 * 2.4
}

/// Width of a block spanning `span` columns, gaps included.
fn span_width(span: usize) -> f32 {
    COLUMN_WIDTH * span as f32 + GAP * span.saturating_sub(1) as f32
}

pub fn view<'a>(console: &'a ConsoleState, ui: &'a UiState, slot_minutes: i32) -> Element<'a, Message> {
    let Some(event) = console.event.as_ref() else {
        return empty_state("No event open", "Create or pick an event in Settings.");
    };
    let tz = event.tz();

    let available = days(&console.sessions, tz);
    let Some(day) = ui
        .selected_day
        .filter(|d| available.contains(d))
        .or_else(|| available.first().copied())
    else {
        return column![
            page_title("Schedule", event.name.clone()),
            empty_state("Nothing scheduled", "Sessions with a start time show up here."),
        ]
        .spacing(20)
        .into();
    };

    let grid = ScheduleGrid::build(&console.sessions, &console.tracks, day, tz);

    let header = row![
        page_title("Schedule", format!("{} · {}", event.name, tz.name())),
        horizontal_space(),
        pick_list(available, Some(day), Message::DaySelected).padding(8),
    ]
    .align_items(Alignment::Center);

    let body: Element<'a, Message> = if grid.column_count() == 0 {
        empty_state("No tracks", "Add tracks to lay sessions out in columns.")
    } else if grid.is_empty() {
        empty_state("No session placed on this day", "Sessions need a start time and a track.")
    } else {
        scrollable(grid_view(console, &grid, row_height(slot_minutes)))
            .direction(scrollable::Direction::Both {
                vertical: scrollable::Properties::default(),
                horizontal: scrollable::Properties::default(),
            })
            .into()
    };

    column![header, body, unplaced_view(console, &grid)]
        .spacing(20)
        .into()
}

fn grid_view<'a>(console: &ConsoleState, grid: &ScheduleGrid, row_height: f32) -> Element<'a, Message> {
    let mut header = row![Space::with_width(TIME_WIDTH)].spacing(GAP);
    for track in &grid.tracks {
        header = header.push(
            container(text(track.name.clone()).size(14).style(ZEN_ACCENT))
                .width(COLUMN_WIDTH)
                .center_x(),
        );
    }

    let mut rows = column![header].spacing(GAP);
    for (r, slots) in grid.occupancy().iter().enumerate() {
        let mut line = row![container(text(grid.slot_label(r)).size(13).style(ZEN_SUBTEXT))
            .width(TIME_WIDTH)
            .height(row_height)]
        .spacing(GAP);

        for (c, slot) in slots.iter().enumerate() {
            match *slot {
                Slot::Empty => {
                    line = line.push(
                        container(Space::new(Length::Fill, Length::Fill))
                            .width(COLUMN_WIDTH)
                            .height(row_height)
                            .style(panel(PanelStyle::GridEmpty)),
                    );
                }
                Slot::Start(index) | Slot::Covered(index) => {
                    let cell = &grid.cells[index];
                    // A spanning block is drawn once per row, at its first column
                    if c != cell.column {
                        continue;
                    }
                    let block = if matches!(slot, Slot::Start(_)) {
                        session_block(console, &cell.session_id, &cell.title, cell.row_span)
                    } else {
                        container(Space::new(Length::Fill, Length::Fill))
                            .style(panel(PanelStyle::GridCovered))
                            .into()
                    };
                    line = line.push(
                        container(block)
                            .width(span_width(cell.col_span))
                            .height(row_height),
                    );
                }
            }
        }
        rows = rows.push(line);
    }

    rows.padding([0, 0, 10, 0]).into()
}

fn session_block<'a>(console: &ConsoleState, session_id: &str, title: &str, row_span: usize) -> Element<'a, Message> {
    let session: Option<&Session> = console.sessions.iter().find(|s| s.id == session_id);
    let color = console
        .category_color(session.and_then(|s| s.category_id.as_deref()))
        .and_then(hex_color)
        .unwrap_or(ZEN_ACCENT);

    let speakers = session
        .filter(|s| s.has_speakers())
        .map(|s| s.speakers.join(", "))
        .unwrap_or_default();

    let mut content = column![text(title.to_string()).size(13).style(ZEN_TEXT)].spacing(2);
    if !speakers.is_empty() {
        content = content.push(text(speakers).size(11).style(ZEN_SUBTEXT));
    }
    if row_span > 1 {
        content = content.push(text(format!("↓ {} slots", row_span)).size(10).style(ZEN_SUBTEXT));
    }

    container(content)
        .padding(8)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(panel(PanelStyle::GridCell(color)))
        .into()
}

fn unplaced_view<'a>(console: &ConsoleState, grid: &ScheduleGrid) -> Element<'a, Message> {
    if grid.unplaced.is_empty() {
        return Space::with_height(Length::Shrink).into();
    }

    let title_of = |id: &str| {
        console
            .sessions
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.title.clone())
            .unwrap_or_else(|| id.to_string())
    };

    let lines: Vec<Element<'a, Message>> = grid
        .unplaced
        .iter()
        .map(|u| {
            let reason = match &u.reason {
                UnplacedReason::MissingStart => "no start time".to_string(),
                UnplacedReason::MissingTrack => "no track".to_string(),
                UnplacedReason::UnknownTrack(id) => format!("unknown track {}", id),
                UnplacedReason::Overlap => "overlaps another session".to_string(),
            };
            row![
                text(title_of(&u.session_id)).size(14).style(ZEN_TEXT),
                text(reason).size(12).style(Color { a: 0.8, ..ZEN_SUBTEXT }),
            ]
            .spacing(10)
            .align_items(Alignment::Center)
            .into()
        })
        .collect();

    container(column![section_header("Not on the grid"), column(lines).spacing(6)].spacing(10))
        .padding(16)
        .width(Length::Fill)
        .style(panel(PanelStyle::Card))
        .into()
}
