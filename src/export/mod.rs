//! Session export.
//!
//! The export menu hands an [`ExportRequest`] to an [`Exporter`], which turns
//! it into a downloadable [`ExportDocument`]. [`DocumentExporter`] covers the
//! built-in formats.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{Category, Event, Format, Session, Track};
use crate::utils::slugify;

mod csv;
mod ical;
mod markdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
    Ical,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Markdown,
        ExportFormat::Ical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Ical => "ical",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
            ExportFormat::Ical => "ics",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Ical => "text/calendar",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Ical => "iCalendar",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "ical" | "ics" | "icalendar" => Ok(ExportFormat::Ical),
            other => Err(AppError::invalid_input(format!("Unknown export format '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExportScope {
    All,
    Filtered,
    Selected,
}

impl ExportScope {
    pub const ALL: [ExportScope; 3] = [ExportScope::All, ExportScope::Filtered, ExportScope::Selected];

    fn suffix(&self) -> &'static str {
        match self {
            ExportScope::All => "all",
            ExportScope::Filtered => "filtered",
            ExportScope::Selected => "selected",
        }
    }
}

impl fmt::Display for ExportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportScope::All => "All sessions",
            ExportScope::Filtered => "Displayed sessions",
            ExportScope::Selected => "Selected sessions",
        };
        write!(f, "{}", label)
    }
}

/// Everything an exporter may need. `filtered` is the currently displayed
/// subset of `all`.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub event: &'a Event,
    pub tracks: &'a [Track],
    pub categories: &'a [Category],
    pub formats: &'a [Format],
    pub all: &'a [Session],
    pub filtered: Vec<&'a Session>,
    pub selected_ids: Vec<String>,
    pub scope: ExportScope,
    pub format: ExportFormat,
    pub timezone: Tz,
}

impl<'a> ExportRequest<'a> {
    /// Sessions covered by the requested scope, in list order.
    pub fn sessions(&self) -> Vec<&'a Session> {
        match self.scope {
            ExportScope::All => self.all.iter().collect(),
            ExportScope::Filtered => self.filtered.clone(),
            ExportScope::Selected => self
                .all
                .iter()
                .filter(|s| self.selected_ids.iter().any(|id| id == &s.id))
                .collect(),
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}-sessions-{}.{}",
            slugify(&self.event.name),
            self.scope.suffix(),
            self.format.extension()
        )
    }

    /// Flattened, human-readable view of the scoped sessions.
    pub fn rows(&self) -> Vec<ExportRow> {
        let tracks: HashMap<&str, &str> =
            self.tracks.iter().map(|t| (t.id.as_str(), t.name.as_str())).collect();
        let categories: HashMap<&str, &str> =
            self.categories.iter().map(|c| (c.id.as_str(), c.name.as_str())).collect();
        let formats: HashMap<&str, &str> =
            self.formats.iter().map(|f| (f.id.as_str(), f.name.as_str())).collect();

        let lookup = |map: &HashMap<&str, &str>, id: &Option<String>| -> String {
            id.as_deref()
                .and_then(|id| map.get(id).copied())
                .unwrap_or("")
                .to_string()
        };

        self.sessions()
            .into_iter()
            .map(|s| ExportRow {
                id: s.id.clone(),
                title: s.title.clone(),
                start: local_time(s.start, self.timezone),
                end: local_time(s.end, self.timezone),
                track: lookup(&tracks, &s.track_id),
                category: lookup(&categories, &s.category_id),
                format: lookup(&formats, &s.format_id),
                speakers: s.speakers.join(", "),
                announced: s.teasing.is_announced(),
            })
            .collect()
    }
}

fn local_time(time: Option<DateTime<Utc>>, tz: Tz) -> String {
    time.map(|t| t.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub track: String,
    pub category: String,
    pub format: String,
    pub speakers: String,
    pub announced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
    pub session_count: usize,
}

impl ExportDocument {
    /// Writes the document into `dir` and returns the full path.
    pub fn write_to(&self, dir: &Path) -> AppResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.content)?;
        crate::utils::logging::log_export(&self.file_name, self.session_count);
        Ok(path)
    }
}

pub trait Exporter {
    fn export(&self, request: &ExportRequest<'_>) -> AppResult<ExportDocument>;
}

/// Built-in renderer for every [`ExportFormat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExporter;

#[derive(Serialize)]
struct JsonExport<'a> {
    event: &'a str,
    timezone: String,
    scope: ExportScope,
    sessions: Vec<ExportRow>,
}

impl Exporter for DocumentExporter {
    fn export(&self, request: &ExportRequest<'_>) -> AppResult<ExportDocument> {
        let sessions = request.sessions();
        if sessions.is_empty() {
            return Err(AppError::export("There are no sessions to export"));
        }

        let content = match request.format {
            ExportFormat::Json => {
                let payload = JsonExport {
                    event: &request.event.name,
                    timezone: request.timezone.name().to_string(),
                    scope: request.scope,
                    sessions: request.rows(),
                };
                serde_json::to_string_pretty(&payload)?
            }
            ExportFormat::Csv => csv::render(&request.rows()),
            ExportFormat::Markdown => markdown::render(request),
            ExportFormat::Ical => ical::render(request),
        };

        Ok(ExportDocument {
            file_name: request.file_name(),
            mime_type: request.format.mime_type().to_string(),
            content,
            session_count: sessions.len(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) struct Fixture {
        pub event: Event,
        pub tracks: Vec<Track>,
        pub categories: Vec<Category>,
        pub formats: Vec<Format>,
        pub sessions: Vec<Session>,
    }

    pub(crate) fn fixture() -> Fixture {
        let event = Event::new("Sunny Tech 2024".to_string(), "Europe/Paris".to_string());
        let tracks = vec![Track::new(&event.id, "Amphi A".to_string(), 0)];
        let categories = vec![Category::new(&event.id, "Web".to_string(), None)];
        let formats = vec![Format::new(&event.id, "Talk".to_string(), Some(45))];

        let mut opening = Session::new(&event.id, "Opening, and welcome".to_string());
        opening.start = Some(Utc.with_ymd_and_hms(2024, 7, 4, 7, 0, 0).unwrap());
        opening.end = Some(Utc.with_ymd_and_hms(2024, 7, 4, 7, 30, 0).unwrap());
        opening.track_id = Some(tracks[0].id.clone());
        opening.category_id = Some(categories[0].id.clone());
        opening.format_id = Some(formats[0].id.clone());
        opening.speakers = vec!["Ada".to_string(), "Grace".to_string()];

        let unscheduled = Session::new(&event.id, "Unscheduled \"secret\" talk".to_string());

        Fixture { event, tracks, categories, formats, sessions: vec![opening, unscheduled] }
    }

    pub(crate) fn request<'a>(f: &'a Fixture, format: ExportFormat, scope: ExportScope) -> ExportRequest<'a> {
        ExportRequest {
            event: &f.event,
            tracks: &f.tracks,
            categories: &f.categories,
            formats: &f.formats,
            all: &f.sessions,
            filtered: vec![&f.sessions[0]],
            selected_ids: vec![f.sessions[1].id.clone()],
            scope,
            format,
            timezone: chrono_tz::Europe::Paris,
        }
    }

    #[test]
    fn test_format_parse_and_display() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("ics".parse::<ExportFormat>().unwrap(), ExportFormat::Ical);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Ical.to_string(), "iCalendar");
    }

    #[test]
    fn test_scope_selects_sessions() {
        let f = fixture();
        assert_eq!(request(&f, ExportFormat::Csv, ExportScope::All).sessions().len(), 2);

        let filtered = request(&f, ExportFormat::Csv, ExportScope::Filtered).sessions();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, f.sessions[0].id);

        let selected = request(&f, ExportFormat::Csv, ExportScope::Selected).sessions();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, f.sessions[1].id);
    }

    #[test]
    fn test_rows_resolve_names_and_local_times() {
        let f = fixture();
        let rows = request(&f, ExportFormat::Csv, ExportScope::All).rows();
        assert_eq!(rows[0].start, "2024-07-04 09:00");
        assert_eq!(rows[0].end, "2024-07-04 09:30");
        assert_eq!(rows[0].track, "Amphi A");
        assert_eq!(rows[0].category, "Web");
        assert_eq!(rows[0].format, "Talk");
        assert_eq!(rows[0].speakers, "Ada, Grace");
        assert_eq!(rows[1].start, "");
        assert_eq!(rows[1].track, "");
    }

    #[test]
    fn test_file_name() {
        let f = fixture();
        let req = request(&f, ExportFormat::Markdown, ExportScope::Filtered);
        assert_eq!(req.file_name(), "sunny-tech-2024-sessions-filtered.md");
    }

    #[test]
    fn test_json_export() {
        let f = fixture();
        let doc = DocumentExporter
            .export(&request(&f, ExportFormat::Json, ExportScope::All))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc.content).unwrap();
        assert_eq!(value["event"], "Sunny Tech 2024");
        assert_eq!(value["timezone"], "Europe/Paris");
        assert_eq!(value["scope"], "All");
        assert_eq!(value["sessions"].as_array().unwrap().len(), 2);
        assert_eq!(doc.mime_type, "application/json");
        assert_eq!(doc.session_count, 2);
    }

    #[test]
    fn test_empty_scope_is_an_error() {
        let f = fixture();
        let mut req = request(&f, ExportFormat::Csv, ExportScope::Filtered);
        req.filtered.clear();
        let err = DocumentExporter.export(&req).unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }

    #[test]
    fn test_write_to_directory() {
        let f = fixture();
        let doc = DocumentExporter
            .export(&request(&f, ExportFormat::Csv, ExportScope::All))
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = doc.write_to(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), doc.content);
    }
}
