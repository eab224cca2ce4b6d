// file: src/models/settings.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub default_export_format: String, // json | csv | markdown | ical
    pub default_timezone: String,      // used when an event has none
    pub slot_minutes_hint: i32,        // row height hint for the grid view
    pub confirm_batch_edits: bool,
    pub last_event_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_export_format: "csv".to_string(),
            default_timezone: "UTC".to_string(),
            slot_minutes_hint: 30,
            confirm_batch_edits: true,
            last_event_id: None,
        }
    }
}
