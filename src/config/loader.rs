//! Configuration loading from file system

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::AppConfig;

/// Path of the config file, with `~` expanded.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// Load configuration from ~/.ntultra/config.json
///
/// Returns AppConfig::default() if the file is missing or invalid.
pub fn load_config() -> AppConfig {
    load_config_from(&default_config_path())
}

/// Load configuration from an explicit path. Never fails.
#[instrument(name = "load_config", skip_all, fields(path = %config_path.display()))]
pub fn load_config_from(config_path: &Path) -> AppConfig {
    if !config_path.exists() {
        info!("Config file not found, using defaults");
        return AppConfig::default();
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Failed to read config file, using defaults");
            return AppConfig::default();
        }
    };

    match serde_json::from_str::<AppConfig>(&content) {
        Ok(config) => {
            info!("Successfully loaded config");
            config
        }
        Err(e) => {
            // Point at the usual mistake: TOML/JS syntax instead of JSON
            let error_hint = if content.trim_start().starts_with('{') {
                ""
            } else {
                "\n\nHint: config.json must be a JSON object, e.g. {\"syncDir\": \"~/Dropbox/ntultra\"}"
            };

            warn!(
                error = %e,
                hint = %error_hint,
                "Failed to parse config JSON, using defaults"
            );
            AppConfig::default()
        }
    }
}
