// ConfDeck - conference session console
// Main entry point for iced application

use std::sync::Arc;

use iced::{Application, Settings as IcedSettings};
use log::{error, info};

use confdeck::app::{AppFlags, ConfDeckApp};
use confdeck::config::{validate_config, AppConfig};
use confdeck::generate::TemplateTeaserGenerator;
use confdeck::utils::logging::{init_logging, log_error_with_context};
use confdeck::Database;

#[tokio::main]
async fn main() -> iced::Result {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting ConfDeck");

    let config = AppConfig::from_env();
    if let Err(e) = validate_config(&config) {
        error!("Invalid configuration: {}", e);
        eprintln!("{}", e.to_safe_string());
        std::process::exit(1);
    }

    let db = match Database::open(&config.db_path).await {
        Ok(database) => Arc::new(database),
        Err(e) => {
            log_error_with_context(&e, "Database");
            eprintln!("Failed to open database at {}", config.db_path.display());
            eprintln!("Set CONFDECK_DB_PATH to a writable location and try again.");
            std::process::exit(1);
        }
    };

    ConfDeckApp::run(IcedSettings {
        flags: AppFlags {
            db,
            config,
            generator: Arc::new(TemplateTeaserGenerator::default()),
        },
        window: iced::window::Settings {
            size: iced::Size::new(1200.0, 800.0),
            resizable: true,
            ..Default::default()
        },
        id: None,
        fonts: vec![],
        default_font: Default::default(),
        default_text_size: iced::Pixels(16.0),
        antialiasing: false,
    })
}
