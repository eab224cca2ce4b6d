//! Command handlers module
//!
//! Async work launched from the console through `Command::perform`. Kept out
//! of the application type so it can be tested against a real database.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};

use crate::batch::BatchUpdate;
use crate::database::{Database, EventData};
use crate::error::{AppError, AppResult};
use crate::export::ExportDocument;
use crate::generate::{generate_for, store_report, GenerationReport, TeaserGenerator, TeaserKind};
use crate::models::{Event, Session, Settings, Social, TeasingStatus};
use crate::utils::logging::log_batch_edit;
use crate::utils::normalize_title;

/// Database operation handlers
pub struct DatabaseHandlers {
    pub db: Database,
}

impl DatabaseHandlers {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        let events = self.db.list_events().await?;
        info!("Found {} events", events.len());
        Ok(events)
    }

    /// Picks the event to open: the requested one, else the last opened one
    /// if it still exists, else the first event in the store.
    pub async fn resolve_event_id(&self, requested: Option<String>) -> AppResult<String> {
        if let Some(id) = requested {
            return Ok(id);
        }

        let settings = self.db.get_settings().await?;
        if let Some(id) = settings.last_event_id {
            match self.db.get_event(&id).await {
                Ok(event) => return Ok(event.id),
                Err(AppError::NotFound(_)) => {
                    warn!("Last opened event {} no longer exists", id);
                }
                Err(e) => return Err(e),
            }
        }

        self.db
            .list_events()
            .await?
            .into_iter()
            .next()
            .map(|e| e.id)
            .ok_or_else(|| AppError::not_found("No events yet. Create one in Settings."))
    }

    /// Loads an event and remembers it as the last opened one.
    pub async fn load_event(&self, event_id: &str) -> AppResult<EventData> {
        let data = self.db.load_event_data(event_id).await?;

        let mut settings = self.db.get_settings().await?;
        if settings.last_event_id.as_deref() != Some(event_id) {
            settings.last_event_id = Some(event_id.to_string());
            if let Err(e) = self.db.update_settings(&settings).await {
                warn!("Could not remember last event: {}", e);
            }
        }

        Ok(data)
    }

    pub async fn create_event(&self, name: String, timezone: String) -> AppResult<Event> {
        let name = normalize_title(&name);
        if name.is_empty() {
            return Err(AppError::invalid_input("Event name is required"));
        }

        let event = Event::new(name, timezone.trim().to_string());
        if !event.has_valid_timezone() {
            return Err(AppError::invalid_input(format!("Unknown timezone '{}'", event.timezone)));
        }

        self.db.create_event(&event).await?;
        info!("Created event '{}'", event.name);
        Ok(event)
    }

    pub async fn apply_batch(
        &self,
        event_id: &str,
        session_ids: &[String],
        update: &BatchUpdate,
    ) -> AppResult<u64> {
        let written = self.db.batch_update_sessions(event_id, session_ids, update).await?;
        log_batch_edit(event_id, written as usize, update.len());
        Ok(written)
    }

    /// Records whether a session was announced on one platform.
    pub async fn set_announced(&self, session_id: &str, social: Social, announced: bool) -> AppResult<TeasingStatus> {
        let session = self.db.get_session(session_id).await?;
        let teasing = session.teasing.with(social, announced);
        self.db.set_teasing(session_id, teasing).await?;
        info!("Session {} announced on {}: {}", session_id, social.as_str(), announced);
        Ok(teasing)
    }

    pub async fn load_settings(&self) -> AppResult<Settings> {
        self.db.get_settings().await
    }

    pub async fn save_settings(&self, settings: &Settings) -> AppResult<()> {
        info!("Updating settings in database");
        self.db.update_settings(settings).await
    }
}

/// Export file handlers
pub struct ExportHandlers {
    pub export_dir: PathBuf,
}

impl ExportHandlers {
    pub fn new(export_dir: PathBuf) -> Self {
        Self { export_dir }
    }

    pub async fn save(&self, document: ExportDocument) -> AppResult<PathBuf> {
        let dir = self.export_dir.clone();
        tokio::task::spawn_blocking(move || document.write_to(&dir))
            .await
            .map_err(|e| AppError::operation_failed(format!("Export task failed: {}", e)))?
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

/// Teaser generation handlers
pub struct GenerationHandlers {
    pub db: Database,
    pub generator: Arc<dyn TeaserGenerator + Send + Sync>,
}

impl GenerationHandlers {
    pub fn new(db: Database, generator: Arc<dyn TeaserGenerator + Send + Sync>) -> Self {
        Self { db, generator }
    }

    /// Generates content for each session and stores what succeeded.
    pub async fn generate(
        &self,
        event: &Event,
        sessions: &[Session],
        kind: TeaserKind,
    ) -> AppResult<GenerationReport> {
        if sessions.is_empty() {
            return Err(AppError::invalid_input("No sessions selected"));
        }

        let refs: Vec<&Session> = sessions.iter().collect();
        let mut report = generate_for(self.generator.as_ref(), event, &refs, kind);
        store_report(&self.db, kind, &mut report).await;
        info!("{}", report.summary());
        Ok(report)
    }
}

/// Command handler factory
pub struct CommandHandlers {
    pub database: DatabaseHandlers,
    pub export: ExportHandlers,
    pub generation: GenerationHandlers,
}

impl CommandHandlers {
    pub fn new(
        db: &Arc<Database>,
        export_dir: PathBuf,
        generator: Arc<dyn TeaserGenerator + Send + Sync>,
    ) -> Self {
        Self {
            database: DatabaseHandlers::new(db.as_ref().clone()),
            export: ExportHandlers::new(export_dir),
            generation: GenerationHandlers::new(db.as_ref().clone(), generator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::MockTeaserGenerator;

    fn document() -> ExportDocument {
        ExportDocument {
            file_name: "riviera-dev-sessions-all.md".to_string(),
            mime_type: "text/markdown".to_string(),
            content: "# Riviera Dev\n".to_string(),
            session_count: 1,
        }
    }

    #[test]
    fn test_export_save_writes_into_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let handlers = ExportHandlers::new(dir.path().join("exports"));

        let path = tokio_test::block_on(handlers.save(document())).unwrap();

        assert_eq!(path, dir.path().join("exports").join("riviera-dev-sessions-all.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Riviera Dev\n");
    }

    #[test]
    fn test_generate_without_sessions_is_rejected() {
        tokio_test::block_on(async {
            let db = Database::connect("sqlite::memory:").await.unwrap();
            let mut generator = MockTeaserGenerator::new();
            generator.expect_generate_text().never();
            let handlers = GenerationHandlers::new(db, Arc::new(generator));

            let event = Event::new("Riviera Dev".to_string(), "UTC".to_string());
            let err = handlers.generate(&event, &[], TeaserKind::Text).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        });
    }
}
