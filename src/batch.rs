//! Batch edit of selected sessions.
//!
//! The dialog collects one or more [`BatchField`] changes; the same changes
//! are written to every selected session, after which the console reloads
//! from the store.

use crate::error::{AppError, AppResult};
use crate::models::{Category, Event, Format, Track};

/// One shared field change. `None` clears the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchField {
    Category(Option<String>),
    Format(Option<String>),
    Track(Option<String>),
    ExtendWidth(Option<u32>),
    ExtendHeight(Option<u32>),
    ResetTeasing,
}

impl BatchField {
    pub fn label(&self) -> &'static str {
        match self {
            BatchField::Category(_) => "category",
            BatchField::Format(_) => "format",
            BatchField::Track(_) => "track",
            BatchField::ExtendWidth(_) => "width",
            BatchField::ExtendHeight(_) => "height",
            BatchField::ResetTeasing => "teasing",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchUpdate {
    fields: Vec<BatchField>,
}

impl BatchUpdate {
    /// Builds an update. A later change to the same field replaces the
    /// earlier one.
    pub fn new(fields: Vec<BatchField>) -> Self {
        let mut update = Self::default();
        for field in fields {
            update.set(field);
        }
        update
    }

    pub fn set(&mut self, field: BatchField) {
        let label = field.label();
        self.fields.retain(|f| f.label() != label);
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[BatchField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Checks the update against the event it targets. Referenced tracks,
    /// categories and formats must belong to that event.
    pub fn validate(
        &self,
        event: &Event,
        session_ids: &[String],
        tracks: &[Track],
        categories: &[Category],
        formats: &[Format],
    ) -> AppResult<()> {
        if session_ids.is_empty() {
            return Err(AppError::invalid_input("No sessions selected"));
        }
        if self.is_empty() {
            return Err(AppError::invalid_input("Nothing to change"));
        }

        for field in &self.fields {
            match field {
                BatchField::Track(Some(id)) => {
                    if !tracks.iter().any(|t| &t.id == id && t.event_id == event.id) {
                        return Err(AppError::invalid_input(format!(
                            "Track {} does not belong to event {}",
                            id, event.name
                        )));
                    }
                }
                BatchField::Category(Some(id)) => {
                    if !categories.iter().any(|c| &c.id == id && c.event_id == event.id) {
                        return Err(AppError::invalid_input(format!(
                            "Category {} does not belong to event {}",
                            id, event.name
                        )));
                    }
                }
                BatchField::Format(Some(id)) => {
                    if !formats.iter().any(|f| &f.id == id && f.event_id == event.id) {
                        return Err(AppError::invalid_input(format!(
                            "Format {} does not belong to event {}",
                            id, event.name
                        )));
                    }
                }
                BatchField::ExtendWidth(Some(0)) | BatchField::ExtendHeight(Some(0)) => {
                    return Err(AppError::invalid_input("Span must be at least 1"));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
