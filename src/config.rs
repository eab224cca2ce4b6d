//! Runtime configuration
//!
//! Read once at startup from `CONFDECK_*` environment variables, with
//! platform directories as defaults.

use std::env;
use std::path::PathBuf;

use log::info;

use crate::error::{AppError, AppResult};

pub const DB_PATH_VAR: &str = "CONFDECK_DB_PATH";
pub const EVENT_ID_VAR: &str = "CONFDECK_EVENT_ID";
pub const EXPORT_DIR_VAR: &str = "CONFDECK_EXPORT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Event opened on startup. Falls back to the last opened event.
    pub event_id: Option<String>,
    /// Directory exported documents are written to.
    pub export_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let db_path = env::var_os(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let event_id = env::var(EVENT_ID_VAR).ok();

        let export_dir = env::var_os(EXPORT_DIR_VAR)
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self { db_path, event_id, export_dir }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("confdeck")
        .join("confdeck.db")
}

/// Validates the configuration before the database is opened.
pub fn validate_config(config: &AppConfig) -> AppResult<()> {
    if config.export_dir.is_file() {
        return Err(AppError::config(format!(
            "Export directory {} is a file",
            config.export_dir.display()
        )));
    }

    if let Some(event_id) = &config.event_id {
        if event_id.trim().is_empty() {
            return Err(AppError::config(format!("{} is set but empty", EVENT_ID_VAR)));
        }
    }

    info!(
        "Configuration OK (database: {}, exports: {})",
        config.db_path.display(),
        config.export_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::{tempdir, NamedTempFile};

    fn clear_env() {
        env::remove_var(DB_PATH_VAR);
        env::remove_var(EVENT_ID_VAR);
        env::remove_var(EXPORT_DIR_VAR);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        env::set_var(DB_PATH_VAR, "/tmp/confdeck-test.db");
        env::set_var(EVENT_ID_VAR, "evt-1");
        env::set_var(EXPORT_DIR_VAR, "/tmp/exports");

        let config = AppConfig::from_env();
        assert_eq!(config.db_path, PathBuf::from("/tmp/confdeck-test.db"));
        assert_eq!(config.event_id.as_deref(), Some("evt-1"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = AppConfig::from_env();
        assert!(config.db_path.ends_with("confdeck/confdeck.db"));
        assert!(config.event_id.is_none());
    }

    #[test]
    fn test_validate_accepts_directory() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("db.sqlite"),
            event_id: Some("evt-1".to_string()),
            export_dir: dir.path().to_path_buf(),
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_file_as_export_dir() {
        let file = NamedTempFile::new().unwrap();
        let config = AppConfig {
            db_path: PathBuf::from("db.sqlite"),
            event_id: None,
            export_dir: file.path().to_path_buf(),
        };
        assert!(matches!(validate_config(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_event_id() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            db_path: PathBuf::from("db.sqlite"),
            event_id: Some("  ".to_string()),
            export_dir: dir.path().to_path_buf(),
        };
        assert!(validate_config(&config).is_err());
    }
}
