//! Configuration module - Application settings
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.ntultra/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_CONFIG_PATH, DEFAULT_DATABASE_PATH, DEFAULT_LOG_TO_FILE};
pub use loader::{default_config_path, load_config, load_config_from};
pub use types::AppConfig;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
