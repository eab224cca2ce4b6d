// file: src/models/taxonomy.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Format {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub duration_minutes: Option<i64>,
}

impl Category {
    pub fn new(event_id: &str, name: String, color: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            name,
            color,
        }
    }
}

impl Format {
    pub fn new(event_id: &str, name: String, duration_minutes: Option<i64>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            name,
            duration_minutes,
        }
    }
}

// Display drives the labels of the filter pick lists.
impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
