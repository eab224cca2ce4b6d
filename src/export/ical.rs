// file: src/export/ical.rs
use icalendar::{Calendar, Component, EventLike, Property};

use super::ExportRequest;

/// One VEVENT per timed session; sessions without a start are skipped.
pub(super) fn render(request: &ExportRequest<'_>) -> String {
    let mut cal = Calendar::new();
    cal.append_property(Property::new("X-WR-CALNAME", &request.event.name));
    cal.append_property(Property::new("X-WR-TIMEZONE", request.timezone.name()));

    let tracks = request.tracks;
    for session in request.sessions() {
        let start = match session.start {
            Some(start) => start,
            None => continue,
        };

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@confdeck", session.id));
        ics_event.summary(&session.title);
        ics_event.starts(start);
        if let Some(end) = session.end {
            ics_event.ends(end);
        }

        let mut description = session.abstract_text.clone().unwrap_or_default();
        if session.has_speakers() {
            if !description.is_empty() {
                description.push_str("\n\n");
            }
            description.push_str(&format!("Speakers: {}", session.speakers.join(", ")));
        }
        if !description.is_empty() {
            ics_event.description(&description);
        }

        if let Some(track) = session
            .track_id
            .as_deref()
            .and_then(|id| tracks.iter().find(|t| t.id == id))
        {
            ics_event.location(&track.name);
        }

        cal.push(ics_event.done());
    }

    cal.done().to_string()
}
