use log::{LevelFilter, SetLoggerError, Level};
use env_logger::{Builder, Target};
use std::env;
use std::io::Write;

pub fn parse_level(value: &str) -> LevelFilter {
    match value.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

pub fn init_logging() -> Result<(), SetLoggerError> {
    let env = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_level = parse_level(&env);

    let mut builder = Builder::from_default_env();

    builder.format(|buf, record| {
        let timestamp = buf.timestamp();
        let target = record.target();
        let file = record.file().unwrap_or("unknown");
        let line = record.line().unwrap_or(0);

        match record.level() {
            Level::Info => {
                writeln!(buf, "{} [INFO] [{}]: {}", timestamp, target, record.args())
            }
            level => {
                writeln!(buf,
                    "{} [{}] [{}:{}] {}: {}",
                    timestamp, level, file, line, target, record.args()
                )
            }
        }
    });

    // The renderer stack is chatty at info level
    if env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()) == "production" {
        builder.filter_module("sqlx", LevelFilter::Warn);
        builder.filter_module("iced", LevelFilter::Warn);
        builder.filter_module("wgpu", LevelFilter::Warn);
        builder.filter_module("naga", LevelFilter::Warn);
    }

    builder.filter_level(log_level)
           .target(Target::Stdout)
           .try_init()
}

pub fn log_error_with_context(error: &anyhow::Error, context: &str) {
    log::error!("[{}] {}", context, error);

    let mut source = error.source();
    while let Some(err) = source {
        log::error!("  Caused by: {}", err);
        source = err.source();
    }
}

pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64) {
    log::debug!("[Database] {} on table {} took {}ms", operation, table, duration_ms);
}

pub fn log_batch_edit(event_id: &str, sessions: usize, fields: usize) {
    log::info!("[Batch] Applied {} field change(s) to {} session(s) of event {}",
               fields, sessions, event_id);
}

pub fn log_export(file_name: &str, sessions: usize) {
    log::info!("[Export] Wrote {} session(s) to {}", sessions, file_name);
}
