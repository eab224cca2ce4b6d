// Declare modules
pub mod event;
pub mod session;
pub mod settings;
pub mod taxonomy;
pub mod track;

// Re-export so callers can `use crate::models::Session` directly.
pub use event::Event;
pub use session::{Session, SessionRow, Social, TeasingStatus};
pub use settings::{Setting, Settings};
pub use taxonomy::{Category, Format};
pub use track::Track;
