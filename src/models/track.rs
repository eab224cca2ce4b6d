// file: src/models/track.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A parallel lane of the schedule, usually a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Track {
    pub id: String,
    pub event_id: String,
    pub name: String,
    /// Column order in the schedule grid.
    pub position: i64,
}

impl Track {
    pub fn new(event_id: &str, name: String, position: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            name,
            position,
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Sorts tracks into grid column order: by position, then id.
pub fn sort_tracks(tracks: &mut [Track]) {
    tracks.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
}
