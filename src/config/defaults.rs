//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Config file location, tilde-expanded at load time
pub const DEFAULT_CONFIG_PATH: &str = "~/.ntultra/config.json";

/// Settings database location
pub const DEFAULT_DATABASE_PATH: &str = "~/.ntultra/db/ntultra.sqlite";

/// JSONL log file enabled by default
pub const DEFAULT_LOG_TO_FILE: bool = true;
