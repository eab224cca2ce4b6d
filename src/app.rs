//! The iced application driving the organizer console.

use std::sync::Arc;

use iced::widget::{button, column, container, row, text, vertical_space};
use iced::{Application, Command, Element, Length, Theme};
use log::{error, info, warn};

use crate::command_handlers::CommandHandlers;
use crate::config::AppConfig;
use crate::console::{ConsoleState, LoadStatus};
use crate::database::Database;
use crate::export::{DocumentExporter, ExportFormat, ExportRequest, Exporter};
use crate::generate::{TeaserGenerator, TeaserKind};
use crate::messages::Message;
use crate::models::{Event, Settings};
use crate::ui;
use crate::ui::styles::{button_style, panel, ButtonStyle, PanelStyle, ZEN_ACCENT, ZEN_SUBTEXT, ZEN_TEXT};
use crate::ui_state::{UiState, View};

/// Startup inputs of [`ConfDeckApp`].
pub struct AppFlags {
    pub db: Arc<Database>,
    pub config: AppConfig,
    pub generator: Arc<dyn TeaserGenerator + Send + Sync>,
}

pub struct ConfDeckApp {
    config: AppConfig,

    // Command handlers for async operations
    handlers: Arc<CommandHandlers>,

    // UI state management
    ui_state: UiState,

    // Data
    console: ConsoleState,
    events: Vec<Event>,
    settings: Settings,
}

impl ConfDeckApp {
    /// Starts loading an event. `None` lets the handlers pick one.
    fn load(&mut self, event_id: Option<String>) -> Command<Message> {
        let ticket = self.console.begin_load();
        self.ui_state.busy = true;
        let handlers = self.handlers.clone();

        Command::perform(
            async move {
                let id = handlers.database.resolve_event_id(event_id).await?;
                handlers.database.load_event(&id).await
            },
            move |result| Message::DataLoaded(ticket, result.map_err(|e| e.to_safe_string())),
        )
    }

    fn reload(&mut self) -> Command<Message> {
        let current = self.console.event.as_ref().map(|e| e.id.clone());
        self.load(current)
    }

    fn list_events(&self) -> Command<Message> {
        let handlers = self.handlers.clone();
        Command::perform(
            async move { handlers.database.list_events().await },
            |result| Message::EventsLoaded(result.map_err(|e| e.to_safe_string())),
        )
    }

    /// Keeps the query string field in step with the filter.
    fn sync_query(&mut self) {
        self.ui_state.query_input = self.console.query_string();
    }

    fn report(&mut self, message: impl Into<String>) {
        self.ui_state.status_message = message.into();
    }

    fn apply_batch(&mut self) -> Command<Message> {
        let Some(event) = self.console.event.clone() else {
            return Command::none();
        };

        let update = match self.ui_state.batch.to_update() {
            Ok(update) => update,
            Err(e) => {
                self.report(e.to_safe_string());
                return Command::none();
            }
        };
        let session_ids = self.console.selection.ids();
        if let Err(e) = update.validate(
            &event,
            &session_ids,
            &self.console.tracks,
            &self.console.categories,
            &self.console.formats,
        ) {
            self.report(e.to_safe_string());
            return Command::none();
        }

        if self.settings.confirm_batch_edits && !self.ui_state.batch.confirm_pending {
            self.ui_state.batch.confirm_pending = true;
            self.report(format!(
                "Apply {} change(s) to {} session(s)? Press Confirm.",
                update.len(),
                session_ids.len()
            ));
            return Command::none();
        }

        self.ui_state.busy = true;
        self.report("Applying batch edit...");
        let handlers = self.handlers.clone();
        Command::perform(
            async move { handlers.database.apply_batch(&event.id, &session_ids, &update).await },
            |result| Message::BatchApplied(result.map_err(|e| e.to_safe_string())),
        )
    }

    fn export(&mut self) -> Command<Message> {
        let Some(event) = self.console.event.as_ref() else {
            return Command::none();
        };

        let rendered = {
            let request = ExportRequest {
                event,
                tracks: &self.console.tracks,
                categories: &self.console.categories,
                formats: &self.console.formats,
                all: &self.console.sessions,
                filtered: self.console.displayed(),
                selected_ids: self.console.selection.ids(),
                scope: self.ui_state.export_scope,
                format: self.ui_state.export_format,
                timezone: event.tz(),
            };
            DocumentExporter.export(&request)
        };

        match rendered {
            Ok(document) => {
                self.ui_state.busy = true;
                self.report(format!("Saving {}...", document.file_name));
                let handlers = self.handlers.clone();
                Command::perform(
                    async move { handlers.export.save(document).await },
                    |result| Message::ExportFinished(result.map_err(|e| e.to_safe_string())),
                )
            }
            Err(e) => {
                self.report(e.to_safe_string());
                Command::none()
            }
        }
    }

    fn generate(&mut self, kind: TeaserKind) -> Command<Message> {
        let Some(event) = self.console.event.clone() else {
            return Command::none();
        };
        let sessions: Vec<_> = self.console.selected_sessions().into_iter().cloned().collect();

        self.ui_state.busy = true;
        self.report(format!("Generating {} teaser(s)...", sessions.len()));
        let handlers = self.handlers.clone();
        Command::perform(
            async move { handlers.generation.generate(&event, &sessions, kind).await },
            |result| Message::GenerationFinished(result.map_err(|e| e.to_safe_string())),
        )
    }

    fn save_settings(&mut self) -> Command<Message> {
        if self.settings.default_timezone.parse::<chrono_tz::Tz>().is_err() {
            self.report(format!("Unknown timezone '{}'", self.settings.default_timezone));
            return Command::none();
        }

        let handlers = self.handlers.clone();
        let settings = self.settings.clone();
        Command::perform(
            async move { handlers.database.save_settings(&settings).await },
            |result| Message::SettingsSaved(result.map_err(|e| e.to_safe_string())),
        )
    }
}

impl Application for ConfDeckApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = AppFlags;

    fn new(flags: AppFlags) -> (Self, Command<Message>) {
        let handlers = CommandHandlers::new(&flags.db, flags.config.export_dir.clone(), flags.generator);
        let requested = flags.config.event_id.clone();

        let mut app = ConfDeckApp {
            config: flags.config,
            handlers: Arc::new(handlers),
            ui_state: UiState::new(),
            console: ConsoleState::new(),
            events: Vec::new(),
            settings: Settings::default(),
        };

        let handlers = app.handlers.clone();
        let load_settings = Command::perform(
            async move { handlers.database.load_settings().await },
            |result| Message::SettingsLoaded(result.map_err(|e| e.to_safe_string())),
        );
        let list_events = app.list_events();
        let open_event = app.load(requested);

        (app, Command::batch(vec![load_settings, list_events, open_event]))
    }

    fn title(&self) -> String {
        match &self.console.event {
            Some(event) => format!("ConfDeck · {}", event.name),
            None => "ConfDeck".to_string(),
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::ShowSessions => {
                self.ui_state.current_view = View::Sessions;
                Command::none()
            }
            Message::ShowSchedule => {
                self.ui_state.current_view = View::Schedule;
                Command::none()
            }
            Message::ShowSettings => {
                self.ui_state.current_view = View::Settings;
                Command::none()
            }

            Message::EventsLoaded(Ok(events)) => {
                self.events = events;
                Command::none()
            }
            Message::EventsLoaded(Err(e)) => {
                self.report(e);
                Command::none()
            }
            Message::EventSelected(event) => {
                info!("Opening event '{}'", event.name);
                self.console.selection.clear();
                self.ui_state.batch.reset();
                self.ui_state.selected_day = None;
                self.load(Some(event.id))
            }
            Message::Reload => self.reload(),
            Message::DataLoaded(ticket, result) => {
                if self.console.finish_load(ticket, result) {
                    self.ui_state.busy = false;
                    match &self.console.status {
                        LoadStatus::Failed(message) => {
                            let message = message.clone();
                            self.report(message);
                        }
                        _ => {
                            if let Some(event) = &self.console.event {
                                self.settings.last_event_id = Some(event.id.clone());
                            }
                            let label = self.console.count_label();
                            self.report(format!("Loaded {}", label));
                        }
                    }
                    self.sync_query();
                }
                Command::none()
            }
            Message::NewEventNameChanged(name) => {
                self.ui_state.new_event_name = name;
                Command::none()
            }
            Message::NewEventTimezoneChanged(tz) => {
                self.ui_state.new_event_timezone = tz;
                Command::none()
            }
            Message::CreateEvent => {
                if self.ui_state.new_event_name.trim().is_empty() {
                    return Command::none();
                }
                let name = self.ui_state.new_event_name.clone();
                let timezone = self.ui_state.new_event_timezone.clone();
                let handlers = self.handlers.clone();
                self.ui_state.busy = true;
                Command::perform(
                    async move { handlers.database.create_event(name, timezone).await },
                    |result| Message::EventCreated(result.map_err(|e| e.to_safe_string())),
                )
            }
            Message::EventCreated(Ok(event)) => {
                self.ui_state.new_event_name.clear();
                self.report(format!("Created {}", event.name));
                let id = event.id.clone();
                self.events.push(event);
                self.console.selection.clear();
                self.ui_state.current_view = View::Sessions;
                self.load(Some(id))
            }
            Message::EventCreated(Err(e)) => {
                self.ui_state.busy = false;
                self.report(e);
                Command::none()
            }

            Message::SearchChanged(search) => {
                self.console.set_search(search);
                self.sync_query();
                Command::none()
            }
            Message::CategoryFilterSelected(choice) => {
                self.console.set_category(choice.id);
                self.sync_query();
                Command::none()
            }
            Message::FormatFilterSelected(choice) => {
                self.console.set_format(choice.id);
                self.sync_query();
                Command::none()
            }
            Message::WithoutSpeakerToggled(value) => {
                self.console.set_without_speaker(value);
                self.sync_query();
                Command::none()
            }
            Message::NotAnnouncedOnToggled(social, value) => {
                self.console.set_not_announced_on(social, value);
                self.sync_query();
                Command::none()
            }
            Message::ClearFilters => {
                self.console.clear_filters();
                self.sync_query();
                Command::none()
            }
            Message::QueryChanged(query) => {
                self.ui_state.query_input = query;
                Command::none()
            }
            Message::ApplyQuery => {
                let query = self.ui_state.query_input.trim().trim_start_matches('?').to_string();
                self.console.apply_query_string(&query);
                self.sync_query();
                Command::none()
            }

            Message::SessionToggled(id) => {
                self.console.toggle_selected(&id);
                Command::none()
            }
            Message::ToggleSelectAll => {
                self.console.toggle_select_all();
                Command::none()
            }
            Message::ClearSelection => {
                self.console.selection.clear();
                Command::none()
            }

            Message::AnnouncedToggled(session_id, social, announced) => {
                let handlers = self.handlers.clone();
                Command::perform(
                    async move { handlers.database.set_announced(&session_id, social, announced).await },
                    |result| Message::AnnouncedSaved(result.map(|_| ()).map_err(|e| e.to_safe_string())),
                )
            }
            Message::AnnouncedSaved(Ok(())) => self.reload(),
            Message::AnnouncedSaved(Err(e)) => {
                self.report(e);
                Command::none()
            }

            Message::OpenBatchDialog => {
                self.ui_state.batch.reset();
                self.ui_state.batch.open = true;
                Command::none()
            }
            Message::CloseBatchDialog => {
                self.ui_state.batch.reset();
                Command::none()
            }
            Message::BatchCategorySelected(edit) => {
                self.ui_state.batch.category = edit;
                self.ui_state.batch.confirm_pending = false;
                Command::none()
            }
            Message::BatchFormatSelected(edit) => {
                self.ui_state.batch.format = edit;
                self.ui_state.batch.confirm_pending = false;
                Command::none()
            }
            Message::BatchTrackSelected(edit) => {
                self.ui_state.batch.track = edit;
                self.ui_state.batch.confirm_pending = false;
                Command::none()
            }
            Message::BatchWidthChanged(value) => {
                self.ui_state.batch.width = value;
                self.ui_state.batch.confirm_pending = false;
                Command::none()
            }
            Message::BatchHeightChanged(value) => {
                self.ui_state.batch.height = value;
                self.ui_state.batch.confirm_pending = false;
                Command::none()
            }
            Message::BatchResetTeasingToggled(value) => {
                self.ui_state.batch.reset_teasing = value;
                self.ui_state.batch.confirm_pending = false;
                Command::none()
            }
            Message::ApplyBatch => self.apply_batch(),
            Message::BatchApplied(Ok(written)) => {
                self.ui_state.batch.reset();
                self.report(format!("Updated {} session(s)", written));
                self.reload()
            }
            Message::BatchApplied(Err(e)) => {
                self.ui_state.busy = false;
                self.ui_state.batch.confirm_pending = false;
                error!("Batch edit failed: {}", e);
                self.report(e);
                Command::none()
            }

            Message::ExportFormatSelected(format) => {
                self.ui_state.export_format = format;
                Command::none()
            }
            Message::ExportScopeSelected(scope) => {
                self.ui_state.export_scope = scope;
                Command::none()
            }
            Message::Export => self.export(),
            Message::ExportFinished(Ok(path)) => {
                self.ui_state.busy = false;
                self.report(format!("Exported to {}", path.display()));
                Command::none()
            }
            Message::ExportFinished(Err(e)) => {
                self.ui_state.busy = false;
                self.report(e);
                Command::none()
            }

            Message::GenerateTeasers(kind) => self.generate(kind),
            Message::GenerationFinished(Ok(report)) => {
                self.report(report.summary());
                self.reload()
            }
            Message::GenerationFinished(Err(e)) => {
                self.report(e);
                self.reload()
            }

            Message::DaySelected(day) => {
                self.ui_state.selected_day = Some(day);
                Command::none()
            }

            Message::SettingsLoaded(Ok(settings)) => {
                match settings.default_export_format.parse::<ExportFormat>() {
                    Ok(format) => self.ui_state.export_format = format,
                    Err(_) => warn!(
                        "Ignoring unknown default export format '{}'",
                        settings.default_export_format
                    ),
                }
                self.ui_state.new_event_timezone = settings.default_timezone.clone();
                self.settings = Settings {
                    last_event_id: self.settings.last_event_id.take().or(settings.last_event_id.clone()),
                    ..settings
                };
                Command::none()
            }
            Message::SettingsLoaded(Err(e)) => {
                self.report(e);
                Command::none()
            }
            Message::DefaultExportFormatSelected(format) => {
                self.settings.default_export_format = format.as_str().to_string();
                self.ui_state.export_format = format;
                Command::none()
            }
            Message::DefaultTimezoneChanged(tz) => {
                self.settings.default_timezone = tz;
                Command::none()
            }
            Message::SlotMinutesChanged(value) => {
                match value.trim().parse::<i32>() {
                    Ok(minutes) if minutes > 0 => self.settings.slot_minutes_hint = minutes,
                    _ => self.report("Slot length must be a whole number of minutes"),
                }
                Command::none()
            }
            Message::ConfirmBatchToggled(value) => {
                self.settings.confirm_batch_edits = value;
                Command::none()
            }
            Message::SaveSettings => self.save_settings(),
            Message::SettingsSaved(Ok(())) => {
                self.report("Settings saved");
                Command::none()
            }
            Message::SettingsSaved(Err(e)) => {
                self.report(e);
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let nav_button = |label: &str, view: View, msg: Message| {
            let is_active = self.ui_state.current_view == view;
            button(
                text(label)
                    .size(14)
                    .horizontal_alignment(iced::alignment::Horizontal::Left),
            )
            .width(Length::Fill)
            .padding(10)
            .style(button_style(ButtonStyle::Nav { active: is_active }))
            .on_press(msg)
        };

        let event_name = self
            .console
            .event
            .as_ref()
            .map(|e| e.name.clone())
            .unwrap_or_else(|| "No event".to_string());

        let sidebar = container(
            column![
                text("ConfDeck").size(24).style(ZEN_ACCENT),
                column![
                    nav_button("Sessions", View::Sessions, Message::ShowSessions),
                    nav_button("Schedule", View::Schedule, Message::ShowSchedule),
                    nav_button("Settings", View::Settings, Message::ShowSettings),
                ]
                .spacing(5),
                vertical_space(),
                container(
                    column![
                        text("Status").size(12).style(ZEN_SUBTEXT),
                        text(&self.ui_state.status_message).size(11).style(ZEN_TEXT),
                        text(event_name).size(11).style(ZEN_SUBTEXT),
                    ]
                    .spacing(4),
                )
                .padding(10)
                .style(panel(PanelStyle::Card)),
            ]
            .spacing(40)
            .padding(20),
        )
        .width(200)
        .height(Length::Fill)
        .style(panel(PanelStyle::Sidebar));

        let content = container(match self.ui_state.current_view {
            View::Sessions => ui::sessions::view(&self.console, &self.ui_state),
            View::Schedule => ui::schedule::view(&self.console, &self.ui_state, self.settings.slot_minutes_hint),
            View::Settings => ui::settings::view(
                &self.settings,
                &self.events,
                self.console.event.as_ref(),
                &self.ui_state,
                &self.config.export_dir,
            ),
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(40);

        container(row![sidebar, content])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(panel(PanelStyle::Background))
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
