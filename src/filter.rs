//! Session list filtering.
//!
//! A [`SessionFilter`] combines a free-text search with tag equality and two
//! "still to do" criteria: no speaker yet, and not announced yet on chosen
//! platforms. The same filter round-trips through a URL query string so a
//! filtered view can be shared.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::models::{Session, Social};

const PARAM_SEARCH: &str = "q";
const PARAM_CATEGORY: &str = "category";
const PARAM_FORMAT: &str = "format";
const PARAM_NO_SPEAKER: &str = "noSpeaker";
const PARAM_NOT_ANNOUNCED_ON: &str = "notAnnouncedOn";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFilter {
    pub search: String,
    pub category: Option<String>,
    pub format: Option<String>,
    pub without_speaker: bool,
    /// Keep sessions not yet announced on any of these platforms
    pub not_announced_on: BTreeSet<Social>,
}

impl SessionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.category.is_some()
            || self.format.is_some()
            || self.without_speaker
            || !self.not_announced_on.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checks one session. Predicates run in a fixed order and stop at the
    /// first one that fails.
    pub fn matches(&self, session: &Session) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !text_matches(session, &needle) {
            return false;
        }

        if let Some(category) = &self.category {
            if session.category_id.as_ref() != Some(category) {
                return false;
            }
        }

        if let Some(format) = &self.format {
            if session.format_id.as_ref() != Some(format) {
                return false;
            }
        }

        if self.without_speaker && session.has_speakers() {
            return false;
        }

        if self
            .not_announced_on
            .iter()
            .any(|social| session.teasing.is_announced_on(*social))
        {
            return false;
        }

        true
    }

    /// Sessions passing the filter, in input order.
    pub fn apply<'a>(&self, sessions: &'a [Session]) -> Vec<&'a Session> {
        sessions.iter().filter(|s| self.matches(s)).collect()
    }

    pub fn set_not_announced_on(&mut self, social: Social, enabled: bool) {
        if enabled {
            self.not_announced_on.insert(social);
        } else {
            self.not_announced_on.remove(&social);
        }
    }

    /// Search text is written as typed so the round trip gives back the same
    /// filter.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.search.trim().is_empty() {
            serializer.append_pair(PARAM_SEARCH, &self.search);
        }
        if let Some(category) = &self.category {
            serializer.append_pair(PARAM_CATEGORY, category);
        }
        if let Some(format) = &self.format {
            serializer.append_pair(PARAM_FORMAT, format);
        }
        if self.without_speaker {
            serializer.append_pair(PARAM_NO_SPEAKER, "true");
        }
        if !self.not_announced_on.is_empty() {
            let socials: Vec<&str> = self.not_announced_on.iter().map(|s| s.as_str()).collect();
            serializer.append_pair(PARAM_NOT_ANNOUNCED_ON, &socials.join(","));
        }
        serializer.finish()
    }

    /// Parses a query string (with or without the leading `?`). Unknown keys
    /// and empty values are ignored.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut filter = Self::default();

        for (key, raw) in form_urlencoded::parse(query.as_bytes()) {
            let value = raw.trim();
            match key.as_ref() {
                PARAM_SEARCH => filter.search = raw.to_string(),
                PARAM_CATEGORY if !value.is_empty() => filter.category = Some(value.to_string()),
                PARAM_FORMAT if !value.is_empty() => filter.format = Some(value.to_string()),
                PARAM_NO_SPEAKER => filter.without_speaker = parse_flag(value),
                PARAM_NOT_ANNOUNCED_ON => {
                    for name in value.split(',').filter(|n| !n.trim().is_empty()) {
                        match name.parse::<Social>() {
                            Ok(social) => {
                                filter.not_announced_on.insert(social);
                            }
                            Err(e) => log::debug!("Ignoring query parameter value: {}", e),
                        }
                    }
                }
                _ => {}
            }
        }

        filter
    }
}

fn text_matches(session: &Session, needle: &str) -> bool {
    if session.title.to_lowercase().contains(needle) {
        return true;
    }
    if let Some(abstract_text) = &session.abstract_text {
        if abstract_text.to_lowercase().contains(needle) {
            return true;
        }
    }
    session
        .speakers
        .iter()
        .any(|speaker| speaker.to_lowercase().contains(needle))
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeasingStatus;

    fn session(title: &str) -> Session {
        Session::new("evt", title.to_string())
    }

    fn sample() -> Vec<Session> {
        let mut keynote = session("Opening Keynote");
        keynote.category_id = Some("cat-main".to_string());
        keynote.format_id = Some("fmt-keynote".to_string());
        keynote.speakers = vec!["Ada Lovelace".to_string()];
        keynote.teasing = TeasingStatus { twitter: true, ..Default::default() };

        let mut workshop = session("Rust Workshop");
        workshop.abstract_text = Some("Hands-on ownership and borrowing".to_string());
        workshop.category_id = Some("cat-dev".to_string());
        workshop.format_id = Some("fmt-workshop".to_string());

        let mut talk = session("Observability at scale");
        talk.category_id = Some("cat-dev".to_string());
        talk.format_id = Some("fmt-talk".to_string());
        talk.speakers = vec!["Grace Hopper".to_string()];
        talk.teasing = TeasingStatus { linkedin: true, ..Default::default() };

        vec![keynote, workshop, talk]
    }

    fn titles(sessions: &[&Session]) -> Vec<String> {
        sessions.iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let sessions = sample();
        let filter = SessionFilter::new();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&sessions).len(), sessions.len());
    }

    #[test]
    fn test_text_search_is_case_insensitive_over_title_abstract_speakers() {
        let sessions = sample();
        let mut filter = SessionFilter::new();

        filter.search = "KEYNOTE".to_string();
        assert_eq!(titles(&filter.apply(&sessions)), vec!["Opening Keynote"]);

        filter.search = "borrowing".to_string();
        assert_eq!(titles(&filter.apply(&sessions)), vec!["Rust Workshop"]);

        filter.search = "hopper".to_string();
        assert_eq!(titles(&filter.apply(&sessions)), vec!["Observability at scale"]);
    }

    #[test]
    fn test_whitespace_search_is_inactive() {
        let filter = SessionFilter { search: "   ".to_string(), ..Default::default() };
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_category_and_format_equality() {
        let sessions = sample();
        let filter = SessionFilter {
            category: Some("cat-dev".to_string()),
            format: Some("fmt-talk".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&filter.apply(&sessions)), vec!["Observability at scale"]);
    }

    fn not_announced_on(socials: &[Social]) -> SessionFilter {
        SessionFilter {
            not_announced_on: socials.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_without_speaker() {
        let sessions = sample();
        let no_speaker = SessionFilter { without_speaker: true, ..Default::default() };
        assert_eq!(titles(&no_speaker.apply(&sessions)), vec!["Rust Workshop"]);
    }

    #[test]
    fn test_not_announced_on_selected_platforms() {
        // keynote: twitter, talk: linkedin, workshop: nowhere
        let sessions = sample();

        let filter = not_announced_on(&[Social::Twitter]);
        assert!(filter.is_active());
        assert_eq!(
            titles(&filter.apply(&sessions)),
            vec!["Rust Workshop", "Observability at scale"]
        );

        let filter = not_announced_on(&[Social::Bluesky]);
        assert_eq!(filter.apply(&sessions).len(), 3);

        let filter = not_announced_on(&[Social::Twitter, Social::Linkedin]);
        assert_eq!(titles(&filter.apply(&sessions)), vec!["Rust Workshop"]);
    }

    #[test]
    fn test_set_not_announced_on() {
        let mut filter = SessionFilter::new();
        filter.set_not_announced_on(Social::Bluesky, true);
        filter.set_not_announced_on(Social::Twitter, true);
        filter.set_not_announced_on(Social::Bluesky, false);
        assert_eq!(filter, not_announced_on(&[Social::Twitter]));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let sessions = sample();
        let filter = SessionFilter {
            category: Some("cat-dev".to_string()),
            not_announced_on: [Social::Twitter].into_iter().collect(),
            ..Default::default()
        };
        let once: Vec<Session> = filter.apply(&sessions).into_iter().cloned().collect();
        let twice: Vec<Session> = filter.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_query_string_round_trip() {
        let filter = SessionFilter {
            search: "rust & wasm".to_string(),
            category: Some("cat-dev".to_string()),
            format: None,
            without_speaker: true,
            not_announced_on: [Social::Bluesky, Social::Twitter].into_iter().collect(),
        };
        let query = filter.to_query_string();
        assert_eq!(
            query,
            "q=rust+%26+wasm&category=cat-dev&noSpeaker=true&notAnnouncedOn=twitter%2Cbluesky"
        );
        assert_eq!(SessionFilter::from_query_string(&query), filter);
        assert_eq!(SessionFilter::from_query_string(&format!("?{}", query)), filter);
    }

    #[test]
    fn test_query_string_keeps_search_as_typed() {
        let filter = SessionFilter { search: "  rust ".to_string(), ..Default::default() };
        assert_eq!(SessionFilter::from_query_string(&filter.to_query_string()), filter);
    }

    #[test]
    fn test_query_string_reads_plain_comma_list() {
        let filter = SessionFilter::from_query_string("notAnnouncedOn=bluesky,twitter,myspace");
        assert_eq!(filter, not_announced_on(&[Social::Twitter, Social::Bluesky]));
    }

    #[test]
    fn test_empty_filter_has_empty_query_string() {
        assert_eq!(SessionFilter::new().to_query_string(), "");
        assert_eq!(SessionFilter::from_query_string(""), SessionFilter::new());
    }

    #[test]
    fn test_query_string_ignores_unknown_and_empty_params() {
        let filter = SessionFilter::from_query_string("utm_source=mail&category=&noSpeaker=1&notAnnouncedOn=");
        assert!(filter.category.is_none());
        assert!(filter.without_speaker);
        assert!(filter.not_announced_on.is_empty());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut filter = SessionFilter::from_query_string("q=rust&category=a&format=b&noSpeaker=true&notAnnouncedOn=linkedin");
        assert!(filter.is_active());
        filter.clear();
        assert_eq!(filter, SessionFilter::new());
        assert_eq!(filter.to_query_string(), "");
    }
}
