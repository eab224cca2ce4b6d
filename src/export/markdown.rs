// file: src/export/markdown.rs
use super::ExportRequest;
use crate::models::Session;
use crate::schedule::{days, render_markdown, ScheduleGrid};

/// Day grids first, then a flat session list including unscheduled ones.
pub(super) fn render(request: &ExportRequest<'_>) -> String {
    let scoped: Vec<Session> = request.sessions().into_iter().cloned().collect();
    let mut out = format!("# {}\n\n", request.event.name);

    for day in days(&scoped, request.timezone) {
        let grid = ScheduleGrid::build(&scoped, request.tracks, day, request.timezone);
        out.push_str(&render_markdown(&grid));
        out.push('\n');
    }

    out.push_str("## Sessions\n\n");
    for row in request.rows() {
        let when = if row.start.is_empty() { "unscheduled".to_string() } else { row.start.clone() };
        out.push_str(&format!("- **{}** ({})", row.title, when));
        if !row.track.is_empty() {
            out.push_str(&format!(" · {}", row.track));
        }
        if !row.speakers.is_empty() {
            out.push_str(&format!(" · {}", row.speakers));
        }
        out.push('\n');
    }

    out
}
