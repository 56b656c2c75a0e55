use thiserror::Error;
use tracing::{error, warn};

use crate::settings::{MAX_THEMES, MAX_THEME_NAME_LEN};

/// Error severity for UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational
    Warning,  // recoverable
    Error,    // operation failed
    Critical, // blocking - requires user action
}

/// Problems with a user-supplied theme name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Theme name cannot be empty")]
    Empty,

    #[error("Theme name too long (max 30 characters, got {len})")]
    TooLong { len: usize },

    #[error("Cannot use reserved names: default, custom (got '{name}')")]
    Reserved { name: String },
}

/// Errors surfaced by theme registry operations.
///
/// These abort the operation before any state change.
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Maximum {max} themes allowed")]
    Capacity { max: usize },

    #[error("Invalid theme document: {0}")]
    Format(String),

    #[error("Theme '{0}' does not exist")]
    UnknownTheme(String),

    #[error("Setting '{key}' can't be changed: {reason}")]
    InvalidSetting { key: String, reason: String },
}

impl ThemeError {
    pub fn capacity() -> Self {
        Self::Capacity { max: MAX_THEMES }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(_) => ErrorSeverity::Critical,
            Self::Capacity { .. } => ErrorSeverity::Critical,
            Self::Format(_) => ErrorSeverity::Critical,
            Self::UnknownTheme(_) => ErrorSeverity::Error,
            Self::InvalidSetting { .. } => ErrorSeverity::Warning,
        }
    }

    /// Text for the blocking notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::Empty) => "Theme name cannot be empty".to_string(),
            Self::Validation(ValidationError::TooLong { .. }) => {
                format!("Theme name too long (max {} characters)", MAX_THEME_NAME_LEN)
            }
            Self::Validation(ValidationError::Reserved { .. }) => {
                "Cannot use reserved names: default, custom".to_string()
            }
            Self::Capacity { max } => format!("Maximum {} themes allowed", max),
            Self::Format(msg) => format!("Failed to import theme: {}", msg),
            Self::UnknownTheme(name) => format!("Theme '{}' not found", name),
            Self::InvalidSetting { key, reason } => format!("Invalid value for {}: {}", key, reason),
        }
    }
}

/// Failures from the local store or the sync mirror.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) | Self::Sqlite(_) => ErrorSeverity::Error,
            Self::Json(_) => ErrorSeverity::Warning,
            Self::Unavailable(_) => ErrorSeverity::Warning,
        }
    }
}

pub type Result<T> = std::result::Result<T, ThemeError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use ntultra::error::ResultExt;
///
/// // Log and continue if the theme list can't be written
/// store.set(Collection::Settings, "themeList", &list).await.log_err();
///
/// // Log as warning for expected failures
/// let restored = mirror.restore("themeList").await.warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

/// Log an error from an async operation. Use for fire-and-forget patterns.
///
/// Store writes and mirror backups go through here: the in-memory change
/// has already been applied, so a failure is only reported.
///
/// ```ignore
/// log_async_err(store.delete(Collection::Settings, &key).await, "delete theme blob");
/// ```
pub fn log_async_err<T, E: std::fmt::Debug>(
    result: std::result::Result<T, E>,
    operation: &str,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            error!(
                error = ?err,
                operation = operation,
                "Async operation failed"
            );
            None
        }
    }
}
