// file: src/models/session.rs
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::{format_timestamp, parse_timestamp};

/// Platform a session can be announced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Social {
    Twitter,
    Linkedin,
    Bluesky,
}

impl Social {
    pub const ALL: [Social; 3] = [Social::Twitter, Social::Linkedin, Social::Bluesky];

    pub fn as_str(&self) -> &'static str {
        match self {
            Social::Twitter => "twitter",
            Social::Linkedin => "linkedin",
            Social::Bluesky => "bluesky",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Social::Twitter => "Twitter",
            Social::Linkedin => "LinkedIn",
            Social::Bluesky => "Bluesky",
        }
    }
}

impl fmt::Display for Social {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Social {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "twitter" | "x" => Ok(Social::Twitter),
            "linkedin" => Ok(Social::Linkedin),
            "bluesky" => Ok(Social::Bluesky),
            other => Err(format!("Unknown social platform '{}'", other)),
        }
    }
}

/// Social-announcement flags for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeasingStatus {
    pub twitter: bool,
    pub linkedin: bool,
    pub bluesky: bool,
}

impl TeasingStatus {
    pub fn is_announced(&self) -> bool {
        Social::ALL.iter().any(|social| self.is_announced_on(*social))
    }

    pub fn is_announced_on(&self, social: Social) -> bool {
        match social {
            Social::Twitter => self.twitter,
            Social::Linkedin => self.linkedin,
            Social::Bluesky => self.bluesky,
        }
    }

    pub fn with(mut self, social: Social, announced: bool) -> Self {
        match social {
            Social::Twitter => self.twitter = announced,
            Social::Linkedin => self.linkedin = announced,
            Social::Bluesky => self.bluesky = announced,
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub abstract_text: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub track_id: Option<String>,
    pub category_id: Option<String>,
    pub format_id: Option<String>,
    /// Speaker display names, empty when nobody is assigned yet.
    pub speakers: Vec<String>,
    pub teasing: TeasingStatus,
    pub teaser_text: Option<String>,
    pub teaser_video_url: Option<String>,
    pub extend_width: Option<u32>,
    pub extend_height: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(event_id: &str, title: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            title,
            abstract_text: None,
            start: None,
            end: None,
            track_id: None,
            category_id: None,
            format_id: None,
            speakers: Vec::new(),
            teasing: TeasingStatus::default(),
            teaser_text: None,
            teaser_video_url: None,
            extend_width: None,
            extend_height: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_speakers(&self) -> bool {
        !self.speakers.is_empty()
    }

    /// Number of grid columns the session covers.
    pub fn col_span(&self) -> u32 {
        span_or_default(self.extend_width)
    }

    /// Number of grid rows the session covers.
    pub fn row_span(&self) -> u32 {
        span_or_default(self.extend_height)
    }

    pub fn duration_minutes(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end > start => Some((end - start).num_minutes()),
            _ => None,
        }
    }
}

fn span_or_default(value: Option<u32>) -> u32 {
    match value {
        Some(v) if v > 0 => v,
        _ => 1,
    }
}

/// Storage shape of a session. Timestamps stay raw text so that a bad value
/// in the store degrades to "no time" instead of failing the whole load.
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub abstract_text: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub track_id: Option<String>,
    pub category_id: Option<String>,
    pub format_id: Option<String>,
    pub speakers: String,
    pub teased_twitter: bool,
    pub teased_linkedin: bool,
    pub teased_bluesky: bool,
    pub teaser_text: Option<String>,
    pub teaser_video_url: Option<String>,
    pub extend_width: Option<i64>,
    pub extend_height: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        let speakers = serde_json::from_str::<Vec<String>>(&row.speakers).unwrap_or_else(|e| {
            log::debug!("Session {} has unreadable speakers ({}), treating as none", row.id, e);
            Vec::new()
        });

        Self {
            start: row.start_time.as_deref().and_then(parse_timestamp),
            end: row.end_time.as_deref().and_then(parse_timestamp),
            speakers,
            teasing: TeasingStatus {
                twitter: row.teased_twitter,
                linkedin: row.teased_linkedin,
                bluesky: row.teased_bluesky,
            },
            extend_width: row.extend_width.and_then(|v| u32::try_from(v).ok()),
            extend_height: row.extend_height.and_then(|v| u32::try_from(v).ok()),
            id: row.id,
            event_id: row.event_id,
            title: row.title,
            abstract_text: row.abstract_text,
            track_id: row.track_id,
            category_id: row.category_id,
            format_id: row.format_id,
            teaser_text: row.teaser_text,
            teaser_video_url: row.teaser_video_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl Session {
    pub fn to_row(&self) -> SessionRow {
        SessionRow {
            id: self.id.clone(),
            event_id: self.event_id.clone(),
            title: self.title.clone(),
            abstract_text: self.abstract_text.clone(),
            start_time: self.start.map(format_timestamp),
            end_time: self.end.map(format_timestamp),
            track_id: self.track_id.clone(),
            category_id: self.category_id.clone(),
            format_id: self.format_id.clone(),
            speakers: serde_json::to_string(&self.speakers).unwrap_or_else(|_| "[]".to_string()),
            teased_twitter: self.teasing.twitter,
            teased_linkedin: self.teasing.linkedin,
            teased_bluesky: self.teasing.bluesky,
            teaser_text: self.teaser_text.clone(),
            teaser_video_url: self.teaser_video_url.clone(),
            extend_width: self.extend_width.map(i64::from),
            extend_height: self.extend_height.map(i64::from),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_row() -> SessionRow {
        let now = Utc::now();
        SessionRow {
            id: "s1".to_string(),
            event_id: "e1".to_string(),
            title: "Rust in production".to_string(),
            abstract_text: None,
            start_time: Some("2024-07-04T09:00:00Z".to_string()),
            end_time: Some("not a date".to_string()),
            track_id: Some("t1".to_string()),
            category_id: None,
            format_id: None,
            speakers: r#"["Ada Lovelace"]"#.to_string(),
            teased_twitter: false,
            teased_linkedin: true,
            teased_bluesky: false,
            teaser_text: None,
            teaser_video_url: None,
            extend_width: Some(2),
            extend_height: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_span_defaults_to_one() {
        let mut session = Session::new("e1", "Keynote".to_string());
        assert_eq!(session.col_span(), 1);
        assert_eq!(session.row_span(), 1);

        session.extend_width = Some(3);
        session.extend_height = Some(0);
        assert_eq!(session.col_span(), 3);
        assert_eq!(session.row_span(), 1);
    }

    #[test]
    fn test_row_with_malformed_timestamp_is_lenient() {
        let session = Session::from(sample_row());
        assert_eq!(session.start, Some(Utc.with_ymd_and_hms(2024, 7, 4, 9, 0, 0).unwrap()));
        assert!(session.end.is_none());
        assert_eq!(session.speakers, vec!["Ada Lovelace".to_string()]);
        assert!(session.teasing.is_announced());
        assert_eq!(session.col_span(), 2);
    }

    #[test]
    fn test_unreadable_speakers_become_empty() {
        let mut row = sample_row();
        row.speakers = "{broken".to_string();
        let session = Session::from(row);
        assert!(!session.has_speakers());
    }

    #[test]
    fn test_duration_minutes() {
        let mut session = Session::new("e1", "Workshop".to_string());
        assert!(session.duration_minutes().is_none());
        session.start = Some(Utc.with_ymd_and_hms(2024, 7, 4, 9, 0, 0).unwrap());
        session.end = Some(Utc.with_ymd_and_hms(2024, 7, 4, 10, 30, 0).unwrap());
        assert_eq!(session.duration_minutes(), Some(90));
    }

    #[test]
    fn test_announced_per_platform() {
        let teasing = TeasingStatus { linkedin: true, ..Default::default() };
        assert!(teasing.is_announced());
        assert!(teasing.is_announced_on(Social::Linkedin));
        assert!(!teasing.is_announced_on(Social::Twitter));
        assert!(!TeasingStatus::default().is_announced());

        let updated = teasing.with(Social::Bluesky, true).with(Social::Linkedin, false);
        assert_eq!(updated, TeasingStatus { bluesky: true, ..Default::default() });
    }

    #[test]
    fn test_social_parse() {
        assert_eq!("Bluesky".parse::<Social>(), Ok(Social::Bluesky));
        assert_eq!(" twitter ".parse::<Social>(), Ok(Social::Twitter));
        assert!("myspace".parse::<Social>().is_err());
        assert_eq!(Social::Linkedin.to_string(), "LinkedIn");
    }
}
