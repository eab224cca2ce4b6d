// ConfDeck Library
// Exposes the console core for the desktop app and for tests

pub mod app;
pub mod batch;
pub mod command_handlers;
pub mod config;
pub mod console;
pub mod database;
pub mod error;
pub mod export;
pub mod filter;
pub mod generate;
pub mod messages;
pub mod models;
pub mod schedule;
pub mod selection;
pub mod ui;
pub mod ui_state;
pub mod utils;

// Re-export commonly used types
pub use batch::{BatchField, BatchUpdate};
pub use config::AppConfig;
pub use console::{ConsoleState, LoadStatus, LoadTicket};
pub use database::{Database, EventData};
pub use error::{AppError, AppResult};
pub use export::{DocumentExporter, ExportDocument, ExportFormat, ExportRequest, ExportScope, Exporter};
pub use filter::SessionFilter;
pub use generate::{TeaserGenerator, TeaserKind, TemplateTeaserGenerator};
pub use models::*;
pub use schedule::ScheduleGrid;
pub use selection::Selection;
