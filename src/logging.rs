//! Logging configuration for ReviewXAI

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

use crate::Result;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "reviewxai.log";

/// Initialize logging system with file output
pub fn init_logging() -> Result<()> {
    init_logging_with_config(None)
}

/// Initialize logging with configuration
pub fn init_logging_with_config(config: Option<&crate::config::AppConfig>) -> Result<()> {
    // Set up environment filter - use config if available, otherwise default
    let (env_filter, level) = if let Some(config) = config {
        let level = config.logging.level.clone();
        (
            EnvFilter::new(format!("{level},reviewxai={level}")),
            level,
        )
    } else {
        (
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reviewxai=debug")),
            "info".to_string(),
        )
    };

    install(env_filter, &level)
}

/// Initialize logging with custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    install(EnvFilter::new(format!("{level},reviewxai={level}")), level)
}

fn install(env_filter: EnvFilter, level: &str) -> Result<()> {
    // Create logs directory if it doesn't exist
    let logs_dir = Path::new(LOG_DIR);
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir)?;
    }

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_ansi(false); // No colors in file

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::ReviewXaiError::Custom(format!("Logging already initialized: {e}")))?;

    tracing::info!("Logging initialized with level: {level} - console and file output enabled");
    tracing::debug!("Log files will be saved to: {LOG_DIR}/{LOG_FILE}.YYYY-MM-DD");

    // The writer thread lives as long as the process
    std::mem::forget(guard);

    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init()
        .map_err(|e| crate::ReviewXaiError::Custom(format!("Logging already initialized: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}
