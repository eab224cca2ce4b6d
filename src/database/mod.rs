// file: src/database/mod.rs

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Row, Sqlite};

use crate::batch::BatchUpdate;
use crate::error::{AppError, AppResult};
use crate::models::{Category, Event, Format, Session, Settings, TeasingStatus, Track};
use crate::utils::logging::log_database_operation;

// Declare submodules
pub mod events;
pub mod sessions;
pub mod settings;
pub mod taxonomy;
pub mod tracks;

/// Everything the console needs to show one event.
#[derive(Debug, Clone)]
pub struct EventData {
    pub event: Event,
    pub sessions: Vec<Session>,
    pub tracks: Vec<Track>,
    pub categories: Vec<Category>,
    pub formats: Vec<Format>,
}

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
            }
        }
        let url = format!("sqlite:{}?mode=rwc", path.display());
        Self::connect(&url).await
    }

    pub async fn connect(db_url: &str) -> Result<Self> {
        let db_exists = Sqlite::database_exists(db_url)
            .await
            .context("Failed to check if database exists")?;
        if !db_exists {
            info!("Creating database");
            Sqlite::create_database(db_url)
                .await
                .context("Failed to create database")?;
        }

        let pool = SqlitePool::connect(db_url)
            .await
            .context("Failed to connect to database")?;

        run_schema(&pool).await.context("Failed to run database schema")?;
        ensure_migrations(&pool).await.context("Failed to ensure migrations")?;

        info!("Database initialized successfully");

        Ok(Database { pool })
    }

    // --- Event Delegates ---

    pub async fn create_event(&self, event: &Event) -> AppResult<()> {
        Ok(events::insert(&self.pool, event).await?)
    }

    pub async fn get_event(&self, event_id: &str) -> AppResult<Event> {
        events::get(&self.pool, event_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("event {}", event_id)))
    }

    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        Ok(events::list(&self.pool).await?)
    }

    pub async fn delete_event(&self, event_id: &str) -> AppResult<()> {
        Ok(events::delete(&self.pool, event_id).await?)
    }

    // --- Track / Taxonomy Delegates ---

    pub async fn add_track(&self, track: &Track) -> AppResult<()> {
        Ok(tracks::insert(&self.pool, track).await?)
    }

    pub async fn list_tracks(&self, event_id: &str) -> AppResult<Vec<Track>> {
        Ok(tracks::list(&self.pool, event_id).await?)
    }

    pub async fn add_category(&self, category: &Category) -> AppResult<()> {
        Ok(taxonomy::insert_category(&self.pool, category).await?)
    }

    pub async fn list_categories(&self, event_id: &str) -> AppResult<Vec<Category>> {
        Ok(taxonomy::list_categories(&self.pool, event_id).await?)
    }

    pub async fn add_format(&self, format: &Format) -> AppResult<()> {
        Ok(taxonomy::insert_format(&self.pool, format).await?)
    }

    pub async fn list_formats(&self, event_id: &str) -> AppResult<Vec<Format>> {
        Ok(taxonomy::list_formats(&self.pool, event_id).await?)
    }

    // --- Session Delegates ---

    pub async fn save_session(&self, session: &Session) -> AppResult<()> {
        Ok(sessions::upsert(&self.pool, session).await?)
    }

    pub async fn get_session(&self, session_id: &str) -> AppResult<Session> {
        sessions::get(&self.pool, session_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("session {}", session_id)))
    }

    pub async fn list_sessions(&self, event_id: &str) -> AppResult<Vec<Session>> {
        let started = Instant::now();
        let sessions = sessions::list(&self.pool, event_id).await?;
        log_database_operation("list", "sessions", started.elapsed().as_millis() as u64);
        Ok(sessions)
    }

    /// Applies `update` to every listed session of the event. Returns the
    /// number of rows written.
    pub async fn batch_update_sessions(
        &self,
        event_id: &str,
        session_ids: &[String],
        update: &BatchUpdate,
    ) -> AppResult<u64> {
        let started = Instant::now();
        let written = sessions::batch_update(&self.pool, event_id, session_ids, update).await?;
        log_database_operation("batch update", "sessions", started.elapsed().as_millis() as u64);
        Ok(written)
    }

    pub async fn set_teaser_text(&self, session_id: &str, text: &str) -> AppResult<()> {
        match sessions::set_teaser_text(&self.pool, session_id, text).await? {
            0 => Err(AppError::not_found(format!("session {}", session_id))),
            _ => Ok(()),
        }
    }

    pub async fn set_teaser_video_url(&self, session_id: &str, url: &str) -> AppResult<()> {
        match sessions::set_teaser_video_url(&self.pool, session_id, url).await? {
            0 => Err(AppError::not_found(format!("session {}", session_id))),
            _ => Ok(()),
        }
    }

    pub async fn set_teasing(&self, session_id: &str, teasing: TeasingStatus) -> AppResult<()> {
        Ok(sessions::set_teasing(&self.pool, session_id, teasing).await?)
    }

    /// Loads the event together with its sessions and lookup tables.
    pub async fn load_event_data(&self, event_id: &str) -> AppResult<EventData> {
        let event = self.get_event(event_id).await?;
        let sessions = self.list_sessions(event_id).await?;
        let tracks = self.list_tracks(event_id).await?;
        let categories = self.list_categories(event_id).await?;
        let formats = self.list_formats(event_id).await?;

        info!(
            "Loaded event '{}': {} sessions, {} tracks",
            event.name,
            sessions.len(),
            tracks.len()
        );

        Ok(EventData { event, sessions, tracks, categories, formats })
    }

    // --- Settings Delegates ---

    pub async fn get_settings(&self) -> AppResult<Settings> {
        Ok(settings::get(&self.pool).await?)
    }

    pub async fn update_settings(&self, settings: &Settings) -> AppResult<()> {
        Ok(settings::update(&self.pool, settings).await?)
    }
}

async fn run_schema(pool: &SqlitePool) -> Result<()> {
    let schema = include_str!("schema.sql");

    let mut current_statement = String::new();

    for line in schema.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.is_empty() {
            continue;
        }

        current_statement.push_str(line);
        current_statement.push('\n');

        if trimmed.ends_with(';') {
            sqlx::query(&current_statement).execute(pool).await?;
            current_statement.clear();
        }
    }
    Ok(())
}

/// Columns added after the first release, with their definitions.
const SESSION_COLUMN_MIGRATIONS: &[(&str, &str)] = &[
    ("teased_bluesky", "BOOLEAN NOT NULL DEFAULT 0"),
    ("teaser_video_url", "TEXT"),
    ("extend_width", "INTEGER"),
    ("extend_height", "INTEGER"),
];

async fn ensure_migrations(pool: &SqlitePool) -> Result<()> {
    let rows = sqlx::query("PRAGMA table_info(sessions)")
        .fetch_all(pool)
        .await
        .context("Failed to fetch table info")?;

    let columns: Vec<String> = rows
        .iter()
        .map(|row| row.get::<String, _>("name"))
        .collect();

    for (column, definition) in SESSION_COLUMN_MIGRATIONS {
        if !columns.iter().any(|c| c == column) {
            info!("Migrating: Adding {} column to sessions table", column);
            sqlx::query(&format!("ALTER TABLE sessions ADD COLUMN {} {}", column, definition))
                .execute(pool)
                .await
                .with_context(|| format!("Failed to add {} column", column))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchField;
    use tempfile::NamedTempFile;

    async fn create_test_database() -> Database {
        let temp_file = NamedTempFile::new().unwrap();
        let (_, path) = temp_file.keep().unwrap();
        Database::open(&path).await.unwrap()
    }

    async fn seeded() -> (Database, Event, Track) {
        let db = create_test_database().await;
        let event = Event::new("Sunny Tech".to_string(), "Europe/Paris".to_string());
        db.create_event(&event).await.unwrap();
        let track = Track::new(&event.id, "Amphi A".to_string(), 0);
        db.add_track(&track).await.unwrap();
        (db, event, track)
    }

    #[tokio::test]
    async fn test_database_new() {
        let db = create_test_database().await;
        assert!(!db.pool.is_closed());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = create_test_database().await;
        run_schema(&db.pool).await.unwrap();
        ensure_migrations(&db.pool).await.unwrap();
        ensure_migrations(&db.pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let db = create_test_database().await;
        let result = db.get_event("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_session_round_trip_through_store() {
        let (db, event, track) = seeded().await;
        let mut session = Session::new(&event.id, "Async Rust".to_string());
        session.track_id = Some(track.id.clone());
        session.speakers = vec!["Grace Hopper".to_string()];
        session.extend_height = Some(2);
        db.save_session(&session).await.unwrap();

        let loaded = db.get_session(&session.id).await.unwrap();
        assert_eq!(loaded.title, "Async Rust");
        assert_eq!(loaded.track_id, Some(track.id));
        assert_eq!(loaded.speakers, vec!["Grace Hopper".to_string()]);
        assert_eq!(loaded.row_span(), 2);
    }

    #[tokio::test]
    async fn test_malformed_start_time_loads_as_absent() {
        let (db, event, _) = seeded().await;
        let session = Session::new(&event.id, "Lightning talk".to_string());
        db.save_session(&session).await.unwrap();
        sqlx::query("UPDATE sessions SET start_time = 'yesterday-ish' WHERE id = ?")
            .bind(&session.id)
            .execute(&db.pool)
            .await
            .unwrap();

        let sessions = db.list_sessions(&event.id).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert!(sessions[0].start.is_none());
    }

    #[tokio::test]
    async fn test_batch_update_only_touches_selection() {
        let (db, event, track) = seeded().await;
        let a = Session::new(&event.id, "A".to_string());
        let b = Session::new(&event.id, "B".to_string());
        db.save_session(&a).await.unwrap();
        db.save_session(&b).await.unwrap();

        let update = BatchUpdate::new(vec![
            BatchField::Track(Some(track.id.clone())),
            BatchField::ExtendWidth(Some(2)),
        ]);
        let written = db
            .batch_update_sessions(&event.id, &[a.id.clone()], &update)
            .await
            .unwrap();
        assert_eq!(written, 1);

        let a = db.get_session(&a.id).await.unwrap();
        let b = db.get_session(&b.id).await.unwrap();
        assert_eq!(a.track_id, Some(track.id));
        assert_eq!(a.col_span(), 2);
        assert!(b.track_id.is_none());
    }

    #[tokio::test]
    async fn test_batch_update_ignores_other_events() {
        let (db, event, _) = seeded().await;
        let other = Event::new("Other".to_string(), "UTC".to_string());
        db.create_event(&other).await.unwrap();
        let foreign = Session::new(&other.id, "Foreign".to_string());
        db.save_session(&foreign).await.unwrap();

        let update = BatchUpdate::new(vec![BatchField::ExtendHeight(Some(3))]);
        let written = db
            .batch_update_sessions(&event.id, &[foreign.id.clone()], &update)
            .await
            .unwrap();
        assert_eq!(written, 0);
    }

    #[tokio::test]
    async fn test_delete_event_cascades() {
        let (db, event, _) = seeded().await;
        db.save_session(&Session::new(&event.id, "Gone".to_string())).await.unwrap();
        db.delete_event(&event.id).await.unwrap();
        assert!(db.list_sessions(&event.id).await.unwrap().is_empty());
        assert!(db.list_tracks(&event.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_settings_default() {
        let db = create_test_database().await;
        let settings = db.get_settings().await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_update_settings() {
        let db = create_test_database().await;
        let mut settings = Settings::default();
        settings.default_export_format = "markdown".to_string();
        settings.last_event_id = Some("evt-1".to_string());

        db.update_settings(&settings).await.unwrap();

        let retrieved = db.get_settings().await.unwrap();
        assert_eq!(retrieved.default_export_format, "markdown");
        assert_eq!(retrieved.last_event_id, Some("evt-1".to_string()));
    }
}
