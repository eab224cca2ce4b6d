use std::path::PathBuf;

use chrono::NaiveDate;

use crate::console::LoadTicket;
use crate::database::EventData;
use crate::export::{ExportFormat, ExportScope};
use crate::generate::{GenerationReport, TeaserKind};
use crate::models::{Event, Settings, Social};
use crate::ui_state::{FieldEdit, FilterChoice};

/// Unified application message type
///
/// Messages are grouped by the part of the console they drive. Async
/// results carry user-safe error strings.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation Messages =====
    ShowSessions,
    ShowSchedule,
    ShowSettings,

    // ===== Event Messages =====
    EventsLoaded(Result<Vec<Event>, String>),
    EventSelected(Event),
    /// Reload the current event from the store
    Reload,
    DataLoaded(LoadTicket, Result<EventData, String>),
    NewEventNameChanged(String),
    NewEventTimezoneChanged(String),
    CreateEvent,
    EventCreated(Result<Event, String>),

    // ===== Filter Messages =====
    SearchChanged(String),
    CategoryFilterSelected(FilterChoice),
    FormatFilterSelected(FilterChoice),
    WithoutSpeakerToggled(bool),
    NotAnnouncedOnToggled(Social, bool),
    ClearFilters,
    /// Edit of the query string field
    QueryChanged(String),
    /// Restore the filter from the query string field
    ApplyQuery,

    // ===== Selection Messages =====
    SessionToggled(String),
    ToggleSelectAll,
    ClearSelection,

    // ===== Announcement Messages =====
    AnnouncedToggled(String, Social, bool),
    AnnouncedSaved(Result<(), String>),

    // ===== Batch Edit Messages =====
    OpenBatchDialog,
    CloseBatchDialog,
    BatchCategorySelected(FieldEdit),
    BatchFormatSelected(FieldEdit),
    BatchTrackSelected(FieldEdit),
    BatchWidthChanged(String),
    BatchHeightChanged(String),
    BatchResetTeasingToggled(bool),
    ApplyBatch,
    BatchApplied(Result<u64, String>),

    // ===== Export Messages =====
    ExportFormatSelected(ExportFormat),
    ExportScopeSelected(ExportScope),
    Export,
    ExportFinished(Result<PathBuf, String>),

    // ===== Teaser Messages =====
    GenerateTeasers(TeaserKind),
    GenerationFinished(Result<GenerationReport, String>),

    // ===== Schedule Messages =====
    DaySelected(NaiveDate),

    // ===== Settings Messages =====
    SettingsLoaded(Result<Settings, String>),
    DefaultExportFormatSelected(ExportFormat),
    DefaultTimezoneChanged(String),
    SlotMinutesChanged(String),
    ConfirmBatchToggled(bool),
    SaveSettings,
    SettingsSaved(Result<(), String>),
}
