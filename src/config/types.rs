//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

/// Application configuration, read from `~/.ntultra/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// SQLite database path (default: ~/.ntultra/db/ntultra.sqlite)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<String>,
    /// Directory used as the sync mirror. Unset means no mirror.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_dir: Option<String>,
    /// Write JSONL logs to ~/.ntultra/logs (default: true)
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
}

fn default_log_to_file() -> bool {
    DEFAULT_LOG_TO_FILE
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            sync_dir: None,
            log_to_file: DEFAULT_LOG_TO_FILE,
        }
    }
}

impl AppConfig {
    /// Resolved database path, with `~` expanded.
    pub fn get_database_path(&self) -> PathBuf {
        let raw = self
            .database_path
            .as_deref()
            .unwrap_or(DEFAULT_DATABASE_PATH);
        expand(raw)
    }

    /// Resolved sync directory, if one is configured and non-blank.
    pub fn get_sync_dir(&self) -> Option<PathBuf> {
        self.sync_dir
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .map(expand)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
