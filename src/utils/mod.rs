use chrono::{DateTime, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

pub mod logging;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").expect("valid slug regex");
    static ref WHITESPACE_RUNS: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// Parses a stored timestamp. Accepts RFC 3339 and the naive
/// `YYYY-MM-DD HH:MM[:SS]` shapes (read as UTC). Anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in naive_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    log::debug!("Ignoring malformed timestamp '{}'", raw);
    None
}

pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Lowercase ASCII slug used for export file names.
pub fn slugify(input: &str) -> String {
    let lower = input.to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "event".to_string()
    } else {
        slug.to_string()
    }
}

pub fn normalize_title(title: &str) -> String {
    WHITESPACE_RUNS.replace_all(title.trim(), " ").to_string()
}

/// Hashtag form of an event name, e.g. `Riviera Dev 2024` -> `#RivieraDev2024`.
pub fn hashtag(name: &str) -> String {
    let tag: String = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    format!("#{}", tag)
}
