//! Structured JSONL logging and human-readable stderr output.
//!
//! This module provides dual-output logging:
//! - **JSONL to file** (~/.ntultra/logs/ntultra.jsonl) - structured, one event per line
//! - **Compact to stderr** - human-readable for developers
//!
//! # Usage
//!
//! ```rust,ignore
//! use ntultra::logging;
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init(true);
//!
//! tracing::info!(event_type = "app_start", "Application started");
//! ```
//!
//! # JSONL Output Format
//!
//! ```json
//! {"timestamp":"2026-10-16T10:30:45.123Z","level":"INFO","target":"ntultra::theme::registry","fields":{"event_type":"theme_event","action":"created","theme":"Ocean","message":"Theme created Ocean"}}
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_NAME: &str = "ntultra.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize logging.
///
/// With `log_to_file` the JSONL layer is added next to stderr output. If the
/// log file can't be opened, only stderr is used.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
pub fn init(log_to_file: bool) -> LoggingGuard {
    let (json_layer, file_guard) = if log_to_file {
        match open_log_file() {
            Some(file) => {
                // Non-blocking writer so store operations never wait on log I/O
                let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
                let layer = fmt::layer()
                    .json()
                    .with_writer(non_blocking_file)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_span_events(FmtSpan::NONE);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        }
    } else {
        (None, None)
    };

    // Environment filter - default to info, allow override via RUST_LOG
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rusqlite=warn"));

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    // A subscriber may already be installed (tests, embedding hosts)
    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            event_type = "app_lifecycle",
            action = "started",
            log_path = %log_path().display(),
            log_to_file = file_guard.is_some(),
            "Logging initialized"
        );
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}

fn open_log_file() -> Option<fs::File> {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
        return None;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))
        .map_err(|e| eprintln!("[LOGGING] Failed to open log file: {}", e))
        .ok()
}

/// Get the log directory path (~/.ntultra/logs/)
fn get_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".ntultra").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("ntultra-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

// =============================================================================
// STRUCTURED LOGGING HELPERS
// =============================================================================

/// Log a theme state transition with structured fields
pub fn log_theme_event(action: &str, theme: &str, details: Option<&str>) {
    let msg = match details {
        Some(d) => format!("Theme {} {} - {}", action, theme, d),
        None => format!("Theme {} {}", action, theme),
    };

    tracing::info!(
        event_type = "theme_event",
        action = action,
        theme = theme,
        details = details,
        "{}", msg
    );
}

/// Log a failed persistence call that was not surfaced to the user
pub fn log_persistence_error(operation: &str, key: &str, error: &str) {
    tracing::error!(
        event_type = "persistence_error",
        operation = operation,
        key = key,
        error_message = error,
        "{} failed for {}: {}", operation, key, error
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_points_at_jsonl_file() {
        let path = log_path();
        assert!(path.to_string_lossy().ends_with("ntultra.jsonl"));
        assert!(path.to_string_lossy().contains("logs"));
    }

    #[test]
    fn init_without_file_is_repeatable() {
        let _first = init(false);
        let _second = init(false);
        log_theme_event("created", "Ocean", Some("test"));
        log_persistence_error("set", "themeList", "disk full");
    }
}
