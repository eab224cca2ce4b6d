// file: src/models/event.rs
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A conference. Every session, track, category and format is scoped to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: String,
    pub name: String,
    /// IANA timezone name, e.g. `Europe/Paris`.
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(name: String, timezone: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            timezone,
            created_at: now,
            updated_at: now,
        }
    }

    /// Resolved timezone; unknown names fall back to UTC.
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                log::warn!(
                    "Unknown timezone '{}' for event '{}', using UTC",
                    self.timezone,
                    self.name
                );
                Tz::UTC
            }
        }
    }

    pub fn has_valid_timezone(&self) -> bool {
        self.timezone.parse::<Tz>().is_ok()
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
