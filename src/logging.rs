//! Logging initialization for registrar.
//!
//! TUI mode: logs to `<paths.state>/logs/registrar-{datetime}.log`
//! CLI mode: logs to stderr

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use registrar::config::Config;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Flushes buffered file output when dropped
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set in TUI mode with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

/// Filter directive: `RUST_LOG` wins, then `--debug`, then the configured level
fn filter_directive(config: &Config, debug_override: bool, rust_log: Option<String>) -> String {
    rust_log.unwrap_or_else(|| {
        if debug_override {
            "debug".to_string()
        } else {
            config.logging.level.clone()
        }
    })
}

/// Log filename with an ISO8601 basic timestamp
fn log_file_name(now: DateTime<Utc>) -> String {
    format!("registrar-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}

/// Initialize logging based on mode and configuration.
///
/// The returned handle must be kept alive for the duration of the program.
pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let directive = filter_directive(config, debug_override, std::env::var("RUST_LOG").ok());
    let filter = tracing_subscriber::EnvFilter::new(directive);

    if is_tui_mode && config.logging.to_file {
        // Terminal is owned by the TUI, so logs go to a file
        let logs_dir = config.logs_path();
        std::fs::create_dir_all(&logs_dir)
            .with_context(|| format!("Failed to create logs directory {}", logs_dir.display()))?;

        let log_filename = log_file_name(Utc::now());
        let log_file_path = logs_dir.join(&log_filename);

        let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false) // No ANSI codes in log files
                    .with_writer(non_blocking),
            )
            .init();

        Ok(LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        })
    }
}
