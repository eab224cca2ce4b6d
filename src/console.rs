//! Session list state of the organizer console.
//!
//! Holds the loaded event data together with the filter and selection the
//! organizer is working with, independent of any widget toolkit.

use log::{debug, info};

use crate::database::EventData;
use crate::filter::SessionFilter;
use crate::models::{Category, Event, Format, Session, Social, Track};
use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Identifies one load request. Only the latest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct ConsoleState {
    pub event: Option<Event>,
    pub sessions: Vec<Session>,
    pub tracks: Vec<Track>,
    pub categories: Vec<Category>,
    pub formats: Vec<Format>,
    pub filter: SessionFilter,
    pub selection: Selection,
    pub status: LoadStatus,
    load_generation: u64,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleState {
    pub fn new() -> Self {
        Self {
            event: None,
            sessions: Vec::new(),
            tracks: Vec::new(),
            categories: Vec::new(),
            formats: Vec::new(),
            filter: SessionFilter::new(),
            selection: Selection::new(),
            status: LoadStatus::Idle,
            load_generation: 0,
        }
    }

    // --- Loading ---

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.status = LoadStatus::Loading;
        LoadTicket(self.load_generation)
    }

    /// Applies a load result unless a newer load was started since. Returns
    /// whether the result was applied. The error is shown as is, so it must
    /// already be user-safe (see [`crate::error::AppError::to_safe_string`]).
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<EventData, String>) -> bool {
        if ticket.0 != self.load_generation {
            debug!(
                "Dropping stale load result (ticket {}, latest {})",
                ticket.0, self.load_generation
            );
            return false;
        }

        match result {
            Ok(data) => {
                info!("Console loaded {} sessions", data.sessions.len());
                self.event = Some(data.event);
                self.sessions = data.sessions;
                self.tracks = data.tracks;
                self.categories = data.categories;
                self.formats = data.formats;
                let ids: Vec<String> = self.sessions.iter().map(|s| s.id.clone()).collect();
                self.selection.retain_existing(ids.iter().map(String::as_str));
                self.status = LoadStatus::Loaded;
            }
            Err(message) => {
                log::error!("Failed to load sessions: {}", message);
                self.status = LoadStatus::Failed(message);
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    // --- Filtering ---

    pub fn displayed(&self) -> Vec<&Session> {
        self.filter.apply(&self.sessions)
    }

    pub fn displayed_ids(&self) -> Vec<String> {
        self.displayed().into_iter().map(|s| s.id.clone()).collect()
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed().len()
    }

    pub fn total_count(&self) -> usize {
        self.sessions.len()
    }

    /// "12 sessions" or "3 / 12 sessions" when a filter hides some.
    pub fn count_label(&self) -> String {
        if self.filter.is_active() {
            format!("{} / {} sessions", self.displayed_count(), self.total_count())
        } else {
            format!("{} sessions", self.total_count())
        }
    }

    pub fn set_search(&mut self, search: String) {
        self.filter.search = search;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.filter.category = category;
    }

    pub fn set_format(&mut self, format: Option<String>) {
        self.filter.format = format;
    }

    pub fn set_without_speaker(&mut self, value: bool) {
        self.filter.without_speaker = value;
    }

    pub fn set_not_announced_on(&mut self, social: Social, enabled: bool) {
        self.filter.set_not_announced_on(social, enabled);
    }

    /// Resets search, category, format and flags together, which also empties
    /// the reflected query string.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    pub fn query_string(&self) -> String {
        self.filter.to_query_string()
    }

    pub fn apply_query_string(&mut self, query: &str) {
        self.filter = SessionFilter::from_query_string(query);
    }

    // --- Selection ---

    pub fn toggle_selected(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    pub fn toggle_select_all(&mut self) {
        let displayed = self.displayed_ids();
        self.selection.toggle_all(displayed.iter().map(String::as_str));
    }

    pub fn is_all_selected(&self) -> bool {
        let displayed = self.displayed_ids();
        self.selection.is_all_selected(displayed.iter().map(String::as_str))
    }

    pub fn selected_sessions(&self) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| self.selection.contains(&s.id))
            .collect()
    }

    // --- Lookups ---

    pub fn track_name(&self, track_id: Option<&str>) -> Option<&str> {
        let id = track_id?;
        self.tracks.iter().find(|t| t.id == id).map(|t| t.name.as_str())
    }

    pub fn category_name(&self, category_id: Option<&str>) -> Option<&str> {
        let id = category_id?;
        self.categories.iter().find(|c| c.id == id).map(|c| c.name.as_str())
    }

    /// Hex color of a category, when it has one.
    pub fn category_color(&self, category_id: Option<&str>) -> Option<&str> {
        let id = category_id?;
        self.categories
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.color.as_deref())
    }

    pub fn format_name(&self, format_id: Option<&str>) -> Option<&str> {
        let id = format_id?;
        self.formats.iter().find(|f| f.id == id).map(|f| f.name.as_str())
    }
}
