//! UI state management module
//!
//! Widget-facing state that does not belong in [`crate::console::ConsoleState`]:
//! current view, form inputs, the batch dialog and status line.

use std::fmt;

use chrono::NaiveDate;

use crate::batch::{BatchField, BatchUpdate};
use crate::error::{AppError, AppResult};
use crate::export::{ExportFormat, ExportScope};
use crate::models::{Category, Format, Track};

/// UI view states
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Sessions,
    Schedule,
    Settings,
}

/// Option of a filter pick list. `id: None` is the "any" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChoice {
    pub id: Option<String>,
    pub label: String,
}

impl FilterChoice {
    pub fn any(label: &str) -> Self {
        Self { id: None, label: label.to_string() }
    }

    pub fn categories(categories: &[Category]) -> Vec<Self> {
        std::iter::once(Self::any("All categories"))
            .chain(categories.iter().map(|c| Self {
                id: Some(c.id.clone()),
                label: c.name.clone(),
            }))
            .collect()
    }

    pub fn formats(formats: &[Format]) -> Vec<Self> {
        std::iter::once(Self::any("All formats"))
            .chain(formats.iter().map(|f| Self {
                id: Some(f.id.clone()),
                label: f.name.clone(),
            }))
            .collect()
    }

    /// The entry matching `id`, if it is listed.
    pub fn find(choices: &[Self], id: Option<&str>) -> Option<Self> {
        choices.iter().find(|c| c.id.as_deref() == id).cloned()
    }
}

impl fmt::Display for FilterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// What the batch dialog does with one reference field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldEdit {
    #[default]
    Keep,
    Clear,
    Set { id: String, label: String },
}

impl FieldEdit {
    fn options<'a>(items: impl Iterator<Item = (&'a str, &'a str)>) -> Vec<Self> {
        [FieldEdit::Keep, FieldEdit::Clear]
            .into_iter()
            .chain(items.map(|(id, label)| FieldEdit::Set {
                id: id.to_string(),
                label: label.to_string(),
            }))
            .collect()
    }

    pub fn categories(categories: &[Category]) -> Vec<Self> {
        Self::options(categories.iter().map(|c| (c.id.as_str(), c.name.as_str())))
    }

    pub fn formats(formats: &[Format]) -> Vec<Self> {
        Self::options(formats.iter().map(|f| (f.id.as_str(), f.name.as_str())))
    }

    pub fn tracks(tracks: &[Track]) -> Vec<Self> {
        Self::options(tracks.iter().map(|t| (t.id.as_str(), t.name.as_str())))
    }

    /// `None` when the field is left alone, otherwise the new value.
    fn change(&self) -> Option<Option<String>> {
        match self {
            FieldEdit::Keep => None,
            FieldEdit::Clear => Some(None),
            FieldEdit::Set { id, .. } => Some(Some(id.clone())),
        }
    }
}

impl fmt::Display for FieldEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldEdit::Keep => write!(f, "Keep as is"),
            FieldEdit::Clear => write!(f, "Clear"),
            FieldEdit::Set { label, .. } => write!(f, "{}", label),
        }
    }
}

/// Inputs of the batch edit dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchForm {
    pub open: bool,
    pub category: FieldEdit,
    pub format: FieldEdit,
    pub track: FieldEdit,
    pub width: String,
    pub height: String,
    pub reset_teasing: bool,
    /// Set after a first Apply when edits need confirming
    pub confirm_pending: bool,
}

impl BatchForm {
    /// Turns the dialog inputs into an update. Blank span inputs leave the
    /// span alone.
    pub fn to_update(&self) -> AppResult<BatchUpdate> {
        let mut update = BatchUpdate::default();

        if let Some(value) = self.category.change() {
            update.set(BatchField::Category(value));
        }
        if let Some(value) = self.format.change() {
            update.set(BatchField::Format(value));
        }
        if let Some(value) = self.track.change() {
            update.set(BatchField::Track(value));
        }
        if let Some(width) = parse_span("Width", &self.width)? {
            update.set(BatchField::ExtendWidth(Some(width)));
        }
        if let Some(height) = parse_span("Height", &self.height)? {
            update.set(BatchField::ExtendHeight(Some(height)));
        }
        if self.reset_teasing {
            update.set(BatchField::ResetTeasing);
        }

        Ok(update)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn parse_span(label: &str, input: &str) -> AppResult<Option<u32>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<u32>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(AppError::invalid_input(format!("{} must be a whole number of at least 1", label))),
    }
}

/// Application UI state
#[derive(Debug, Clone)]
pub struct UiState {
    pub current_view: View,

    /// Status line shown under the navigation
    pub status_message: String,

    /// Whether a store operation is in progress
    pub busy: bool,

    /// Query string field, kept in sync with the filter
    pub query_input: String,

    pub batch: BatchForm,

    pub export_format: ExportFormat,
    pub export_scope: ExportScope,

    /// Day shown by the schedule view
    pub selected_day: Option<NaiveDate>,

    pub new_event_name: String,
    pub new_event_timezone: String,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            current_view: View::Sessions,
            status_message: "Ready".to_string(),
            busy: false,
            query_input: String::new(),
            batch: BatchForm::default(),
            export_format: ExportFormat::Csv,
            export_scope: ExportScope::Filtered,
            selected_day: None,
            new_event_name: String::new(),
            new_event_timezone: "UTC".to_string(),
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_builds_empty_update() {
        let update = BatchForm::default().to_update().unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_form_collects_changes() {
        let form = BatchForm {
            open: true,
            category: FieldEdit::Clear,
            format: FieldEdit::Keep,
            track: FieldEdit::Set { id: "t1".to_string(), label: "Amphi".to_string() },
            width: " 2 ".to_string(),
            height: String::new(),
            reset_teasing: true,
            confirm_pending: false,
        };
        let update = form.to_update().unwrap();
        assert_eq!(
            update.fields(),
            &[
                BatchField::Category(None),
                BatchField::Track(Some("t1".to_string())),
                BatchField::ExtendWidth(Some(2)),
                BatchField::ResetTeasing,
            ]
        );
    }

    #[test]
    fn test_form_rejects_bad_span() {
        let form = BatchForm { height: "0".to_string(), ..Default::default() };
        assert!(form.to_update().is_err());
        let form = BatchForm { width: "wide".to_string(), ..Default::default() };
        assert!(form.to_update().is_err());
    }

    #[test]
    fn test_filter_choices_start_with_any() {
        let categories = vec![Category::new("evt", "Web".to_string(), None)];
        let choices = FilterChoice::categories(&categories);
        assert_eq!(choices.len(), 2);
        assert!(choices[0].id.is_none());
        assert_eq!(
            FilterChoice::find(&choices, Some(categories[0].id.as_str())).map(|c| c.label),
            Some("Web".to_string())
        );
        assert_eq!(FilterChoice::find(&choices, None), Some(choices[0].clone()));
    }

    #[test]
    fn test_field_edit_labels() {
        let tracks = vec![Track::new("evt", "Amphi".to_string(), 0)];
        let options = FieldEdit::tracks(&tracks);
        let labels: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        assert_eq!(labels, vec!["Keep as is", "Clear", "Amphi"]);
    }
}
