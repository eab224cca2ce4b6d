use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use confdeck::command_handlers::{CommandHandlers, DatabaseHandlers};
use confdeck::schedule::{render_markdown, Slot};
use confdeck::{
    AppError, AppResult, BatchField, BatchUpdate, ConsoleState, Database, DocumentExporter, Event,
    ExportFormat, ExportRequest, ExportScope, Exporter, LoadStatus, ScheduleGrid, Session, Social,
    TeaserGenerator, TeaserKind, Track,
};
use tempfile::{tempdir, NamedTempFile};

async fn create_test_database() -> Database {
    let temp_file = NamedTempFile::new().unwrap();
    let (_, path) = temp_file.keep().unwrap();
    Database::open(&path).await.unwrap()
}

/// Generator that echoes titles and refuses sessions without speakers.
struct EchoGenerator;

impl TeaserGenerator for EchoGenerator {
    fn generate_text(&self, session: &Session, _event: &Event) -> AppResult<String> {
        if session.has_speakers() {
            Ok(format!("Coming up: {}", session.title))
        } else {
            Err(AppError::invalid_input("No speaker to announce"))
        }
    }

    fn generate_video(&self, session: &Session, _event: &Event) -> AppResult<String> {
        Ok(format!("https://videos.example.com/{}.mp4", session.id))
    }
}

async fn seed(db: &Database) -> (Event, Vec<Track>) {
    let event = Event::new("Riviera Dev".to_string(), "Europe/Paris".to_string());
    db.create_event(&event).await.unwrap();
    let tracks = vec![
        Track::new(&event.id, "Main".to_string(), 0),
        Track::new(&event.id, "Workshop".to_string(), 1),
    ];
    for track in &tracks {
        db.add_track(track).await.unwrap();
    }

    // 09:00, 10:00 and 11:00 in Paris
    let at = |hour: u32| chrono_tz::Europe::Paris.with_ymd_and_hms(2024, 7, 4, hour, 0, 0).unwrap().with_timezone(&Utc);

    let mut opening = Session::new(&event.id, "Opening".to_string());
    opening.start = Some(at(9));
    opening.track_id = Some(tracks[0].id.clone());
    opening.extend_width = Some(2);
    opening.speakers = vec!["Ada".to_string()];

    let mut rust = Session::new(&event.id, "Rust workshop".to_string());
    rust.start = Some(at(10));
    rust.track_id = Some(tracks[1].id.clone());
    rust.extend_height = Some(2);
    rust.speakers = vec!["Grace".to_string()];

    let mut talk = Session::new(&event.id, "Rust and WebAssembly".to_string());
    talk.start = Some(at(11));
    talk.track_id = Some(tracks[0].id.clone());

    let draft = Session::new(&event.id, "Untitled draft".to_string());

    for session in [&opening, &rust, &talk, &draft] {
        db.save_session(session).await.unwrap();
    }

    (event, tracks)
}

async fn load(handlers: &DatabaseHandlers, console: &mut ConsoleState, event_id: Option<String>) {
    let ticket = console.begin_load();
    let result = async {
        let id = handlers.resolve_event_id(event_id).await?;
        handlers.load_event(&id).await
    }
    .await
    .map_err(|e| e.to_safe_string());
    assert!(console.finish_load(ticket, result));
}

#[tokio::test]
async fn test_browse_filter_select_and_batch_edit() {
    let db = create_test_database().await;
    let (event, tracks) = seed(&db).await;
    let handlers = DatabaseHandlers::new(db.clone());

    let mut console = ConsoleState::new();
    load(&handlers, &mut console, None).await;
    assert_eq!(console.status, LoadStatus::Loaded);
    assert_eq!(console.event.as_ref().map(|e| e.id.clone()), Some(event.id.clone()));
    assert_eq!(console.total_count(), 4);
    assert_eq!(console.displayed_count(), 4);

    // The opened event is remembered
    let settings = db.get_settings().await.unwrap();
    assert_eq!(settings.last_event_id, Some(event.id.clone()));

    console.set_search("rust".to_string());
    assert_eq!(console.displayed_count(), 2);
    assert_eq!(console.query_string(), "q=rust");

    console.toggle_select_all();
    assert_eq!(console.selection.len(), 2);

    let update = BatchUpdate::new(vec![BatchField::Track(Some(tracks[1].id.clone()))]);
    let ids = console.selection.ids();
    update
        .validate(&event, &ids, &console.tracks, &console.categories, &console.formats)
        .unwrap();
    let written = handlers.apply_batch(&event.id, &ids, &update).await.unwrap();
    assert_eq!(written, 2);

    load(&handlers, &mut console, Some(event.id.clone())).await;
    for session in console.selected_sessions() {
        assert_eq!(session.track_id.as_deref(), Some(tracks[1].id.as_str()));
    }
    // Filter and selection survive the reload
    assert_eq!(console.displayed_count(), 2);
    assert_eq!(console.selection.len(), 2);

    console.clear_filters();
    assert_eq!(console.query_string(), "");
    assert_eq!(console.displayed_count(), console.total_count());
}

#[tokio::test]
async fn test_missing_event_reports_safe_error() {
    let db = create_test_database().await;
    let handlers = DatabaseHandlers::new(db);

    let mut console = ConsoleState::new();
    load(&handlers, &mut console, None).await;
    assert_eq!(
        console.status,
        LoadStatus::Failed("Not found: No events yet. Create one in Settings.".to_string())
    );
}

#[tokio::test]
async fn test_deleted_last_event_falls_back_to_first_event() {
    let db = create_test_database().await;
    let handlers = DatabaseHandlers::new(db.clone());

    let gone = handlers.create_event("Gone".to_string(), "UTC".to_string()).await.unwrap();
    let kept = handlers.create_event("Kept".to_string(), "UTC".to_string()).await.unwrap();
    handlers.load_event(&gone.id).await.unwrap();
    assert_eq!(db.get_settings().await.unwrap().last_event_id, Some(gone.id.clone()));

    db.delete_event(&gone.id).await.unwrap();

    let mut console = ConsoleState::new();
    load(&handlers, &mut console, None).await;
    assert_eq!(console.status, LoadStatus::Loaded);
    assert_eq!(console.event.as_ref().map(|e| e.id.clone()), Some(kept.id.clone()));
    assert_eq!(db.get_settings().await.unwrap().last_event_id, Some(kept.id));
}

#[tokio::test]
async fn test_create_event_normalizes_name() {
    let db = create_test_database().await;
    let handlers = DatabaseHandlers::new(db.clone());

    let event = handlers
        .create_event("  Riviera   Dev\t2024 ".to_string(), "Europe/Paris".to_string())
        .await
        .unwrap();
    assert_eq!(event.name, "Riviera Dev 2024");

    let err = handlers.create_event("   ".to_string(), "UTC".to_string()).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    let err = handlers.create_event("Sunny Tech".to_string(), "Mars/Olympus".to_string()).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn test_mark_announced_then_filter_per_platform() {
    let db = create_test_database().await;
    let (event, _) = seed(&db).await;
    let handlers = DatabaseHandlers::new(db.clone());

    let mut console = ConsoleState::new();
    load(&handlers, &mut console, Some(event.id.clone())).await;
    let opening = console.sessions.iter().find(|s| s.title == "Opening").unwrap().id.clone();

    let teasing = handlers.set_announced(&opening, Social::Linkedin, true).await.unwrap();
    assert!(teasing.linkedin);
    assert!(!teasing.twitter);

    load(&handlers, &mut console, Some(event.id.clone())).await;
    console.set_not_announced_on(Social::Linkedin, true);
    assert_eq!(console.displayed_count(), 3);
    assert!(console.displayed().iter().all(|s| s.id != opening));

    console.set_not_announced_on(Social::Linkedin, false);
    console.set_not_announced_on(Social::Twitter, true);
    assert_eq!(console.displayed_count(), 4);

    handlers.set_announced(&opening, Social::Linkedin, false).await.unwrap();
    assert!(!db.get_session(&opening).await.unwrap().teasing.is_announced());
}

#[tokio::test]
async fn test_schedule_grid_from_store() {
    let db = create_test_database().await;
    let (event, tracks) = seed(&db).await;
    let data = db.load_event_data(&event.id).await.unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
    let grid = ScheduleGrid::build(&data.sessions, &data.tracks, day, event.tz());

    assert_eq!(grid.column_count(), tracks.len());
    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.slot_label(0), "09:00");

    let opening = data.sessions.iter().find(|s| s.title == "Opening").unwrap();
    let cell = grid.cell_for(&opening.id).unwrap();
    assert_eq!((cell.row, cell.column, cell.col_span), (0, 0, 2));
    assert_eq!(grid.occupancy()[0][1], Slot::Covered(0));

    // The workshop spans into the 11:00 row of its column
    let workshop = data.sessions.iter().find(|s| s.title == "Rust workshop").unwrap();
    let cell = grid.cell_for(&workshop.id).unwrap();
    assert_eq!((cell.row, cell.column, cell.row_span), (1, 1, 2));
    assert!(matches!(grid.occupancy()[2][1], Slot::Covered(_)));

    // The draft has no start time
    assert_eq!(grid.unplaced.len(), 1);

    let markdown = render_markdown(&grid);
    assert!(markdown.contains("| 09:00 | Opening | ← |"));
}

#[tokio::test]
async fn test_export_and_generate_selected_sessions() {
    let db = create_test_database().await;
    let (event, _) = seed(&db).await;
    let export_dir = tempdir().unwrap();
    let handlers = CommandHandlers::new(
        &Arc::new(db.clone()),
        export_dir.path().to_path_buf(),
        Arc::new(EchoGenerator),
    );

    let mut console = ConsoleState::new();
    load(&handlers.database, &mut console, Some(event.id.clone())).await;
    console.set_search("rust".to_string());
    console.toggle_select_all();

    let document = {
        let request = ExportRequest {
            event: &event,
            tracks: &console.tracks,
            categories: &console.categories,
            formats: &console.formats,
            all: &console.sessions,
            filtered: console.displayed(),
            selected_ids: console.selection.ids(),
            scope: ExportScope::Selected,
            format: ExportFormat::Csv,
            timezone: event.tz(),
        };
        DocumentExporter.export(&request).unwrap()
    };
    assert_eq!(document.session_count, 2);
    assert_eq!(document.file_name, "riviera-dev-sessions-selected.csv");

    let path = handlers.export.save(document).await.unwrap();
    let written = std::fs::read_to_string(path).unwrap();
    assert!(written.contains("Rust workshop"));
    assert!(!written.contains("Opening"));

    let selected: Vec<Session> = console.selected_sessions().into_iter().cloned().collect();
    let report = handlers
        .generation
        .generate(&event, &selected, TeaserKind::Text)
        .await
        .unwrap();
    // "Rust and WebAssembly" has no speaker
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);

    let workshop = selected.iter().find(|s| s.title == "Rust workshop").unwrap();
    let stored = db.get_session(&workshop.id).await.unwrap();
    assert_eq!(stored.teaser_text.as_deref(), Some("Coming up: Rust workshop"));

    let report = handlers
        .generation
        .generate(&event, &selected, TeaserKind::Video)
        .await
        .unwrap();
    assert_eq!(report.succeeded(), 2);
    let stored = db.get_session(&workshop.id).await.unwrap();
    assert_eq!(
        stored.teaser_video_url,
        Some(format!("https://videos.example.com/{}.mp4", workshop.id))
    );
}

#[tokio::test]
async fn test_generation_keeps_going_when_a_session_cannot_be_saved() {
    let db = create_test_database().await;
    let (event, _) = seed(&db).await;
    let handlers = CommandHandlers::new(&Arc::new(db.clone()), tempdir().unwrap().path().to_path_buf(), Arc::new(EchoGenerator));

    let stored = db.list_sessions(&event.id).await.unwrap();
    let opening = stored.iter().find(|s| s.title == "Opening").unwrap().clone();
    let mut unsaved = Session::new(&event.id, "Never stored".to_string());
    unsaved.speakers = vec!["Linus".to_string()];

    let report = handlers
        .generation
        .generate(&event, &[unsaved.clone(), opening.clone()], TeaserKind::Text)
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    let failure = report.outcomes.iter().find(|o| o.session_id == unsaved.id).unwrap();
    assert_eq!(failure.result, Err(format!("Not found: session {}", unsaved.id)));
    assert_eq!(
        db.get_session(&opening.id).await.unwrap().teaser_text.as_deref(),
        Some("Coming up: Opening")
    );
}
