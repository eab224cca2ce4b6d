// file: src/schedule/render.rs
use super::grid::{ScheduleGrid, Slot};

/// Renders the grid as a Markdown table. Positions covered by a spanning
/// session show an arrow pointing back at it.
pub fn render_markdown(grid: &ScheduleGrid) -> String {
    let mut out = String::new();
    out.push_str(&format!("### {}\n\n", grid.day.format("%A, %B %-d, %Y")));

    if grid.is_empty() {
        out.push_str("_No sessions scheduled._\n");
        return out;
    }

    out.push_str("| Time |");
    for track in &grid.tracks {
        out.push_str(&format!(" {} |", escape_cell(&track.name)));
    }
    out.push('\n');

    out.push_str("|---|");
    for _ in &grid.tracks {
        out.push_str("---|");
    }
    out.push('\n');

    for (row, slots) in grid.occupancy().iter().enumerate() {
        out.push_str(&format!("| {} |", grid.slot_label(row)));
        for slot in slots {
            let content = match slot {
                Slot::Empty => String::new(),
                Slot::Start(index) => escape_cell(&grid.cells[*index].title),
                Slot::Covered(index) => {
                    if grid.cells[*index].row < row {
                        "↑".to_string()
                    } else {
                        "←".to_string()
                    }
                }
            };
            out.push_str(&format!(" {} |", content));
        }
        out.push('\n');
    }

    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
