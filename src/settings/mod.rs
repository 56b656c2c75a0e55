//! Settings module - the flat option map rendered by the new-tab page
//!
//! # Module Structure
//!
//! - `defaults` - Default values and registry limits
//! - `types` - The `Settings` map and merge rules

mod defaults;
mod types;

pub use defaults::{
    default_settings_map, CUSTOM_THEME, DEFAULT_THEME, IMPORTED_THEME_NAME, MAX_THEMES,
    MAX_THEME_NAME_LEN, STYLE_EXPANDED_KEY, THEME_MODE_KEY, THEME_VERSION,
};
pub use types::{is_scalar, Settings};
