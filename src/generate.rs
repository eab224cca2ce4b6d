//! Teasing content for selected sessions.
//!
//! Generation itself sits behind [`TeaserGenerator`]; the console only drives
//! it over a selection and stores what comes back.

use chrono_tz::Tz;
use log::{info, warn};

use crate::database::Database;
use crate::error::{AppError, AppResult};
use crate::models::{Event, Session};
use crate::utils::hashtag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeaserKind {
    Text,
    Video,
}

#[cfg_attr(test, mockall::automock)]
pub trait TeaserGenerator {
    /// Announcement text for one session.
    fn generate_text(&self, session: &Session, event: &Event) -> AppResult<String>;

    /// URL of a rendered teaser video for one session.
    fn generate_video(&self, session: &Session, event: &Event) -> AppResult<String>;
}

pub const DEFAULT_TEMPLATE: &str = "📣 {title}{speakers}\n🗓️ {time}\n{hashtag}";

/// Local, template-driven text generator.
///
/// Placeholders: `{title}`, `{speakers}` (rendered as ` by A & B` or empty),
/// `{time}` (local start or `soon`), `{hashtag}`, `{event}`.
#[derive(Debug, Clone)]
pub struct TemplateTeaserGenerator {
    template: String,
}

impl TemplateTeaserGenerator {
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into() }
    }
}

impl Default for TemplateTeaserGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl TeaserGenerator for TemplateTeaserGenerator {
    fn generate_text(&self, session: &Session, event: &Event) -> AppResult<String> {
        if session.title.trim().is_empty() {
            return Err(AppError::invalid_input(format!("Session {} has no title", session.id)));
        }

        let speakers = if session.has_speakers() {
            format!(" by {}", session.speakers.join(" & "))
        } else {
            String::new()
        };
        let tz: Tz = event.tz();
        let time = session
            .start
            .map(|start| start.with_timezone(&tz).format("%A %-d %B, %H:%M").to_string())
            .unwrap_or_else(|| "soon".to_string());

        Ok(self
            .template
            .replace("{title}", session.title.trim())
            .replace("{speakers}", &speakers)
            .replace("{time}", &time)
            .replace("{hashtag}", &hashtag(&event.name))
            .replace("{event}", &event.name))
    }

    fn generate_video(&self, _session: &Session, _event: &Event) -> AppResult<String> {
        Err(AppError::unsupported("Video teasers need an external rendering service"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub session_id: String,
    pub result: Result<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub outcomes: Vec<GenerationOutcome>,
}

impl GenerationReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn summary(&self) -> String {
        match self.failed() {
            0 => format!("Generated {} teaser(s)", self.succeeded()),
            failed => format!("Generated {} teaser(s), {} failed", self.succeeded(), failed),
        }
    }
}

/// Runs the generator for each session. A failure is recorded and the batch
/// continues.
pub fn generate_for<G: TeaserGenerator + ?Sized>(
    generator: &G,
    event: &Event,
    sessions: &[&Session],
    kind: TeaserKind,
) -> GenerationReport {
    let outcomes = sessions
        .iter()
        .map(|session| {
            let result = match kind {
                TeaserKind::Text => generator.generate_text(session, event),
                TeaserKind::Video => generator.generate_video(session, event),
            };
            if let Err(e) = &result {
                warn!("Teaser generation failed for session {}: {}", session.id, e);
            }
            GenerationOutcome {
                session_id: session.id.clone(),
                result: result.map_err(|e| e.to_safe_string()),
            }
        })
        .collect();

    GenerationReport { outcomes }
}

/// Saves the successful outcomes on their sessions and returns how many were
/// written. An outcome that cannot be saved is turned into a failure so the
/// report matches what the store holds.
pub async fn store_report(db: &Database, kind: TeaserKind, report: &mut GenerationReport) -> usize {
    let mut stored = 0;
    for outcome in &mut report.outcomes {
        let Ok(content) = &outcome.result else {
            continue;
        };
        let saved = match kind {
            TeaserKind::Text => db.set_teaser_text(&outcome.session_id, content).await,
            TeaserKind::Video => db.set_teaser_video_url(&outcome.session_id, content).await,
        };
        match saved {
            Ok(()) => stored += 1,
            Err(e) => {
                warn!("Could not save teaser for session {}: {}", outcome.session_id, e);
                outcome.result = Err(e.to_safe_string());
            }
        }
    }
    info!("Stored {} generated teaser(s)", stored);
    stored
}
