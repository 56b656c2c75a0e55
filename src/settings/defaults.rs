//! Default settings values
//!
//! The compile-time default set every loaded settings blob is merged over,
//! plus the limits shared by the theme registry.

use serde_json::{json, Map, Value};

/// Format tag written into exported theme documents
pub const THEME_VERSION: &str = "1.0";

/// Maximum number of entries in the theme list (including `default` and `custom`)
pub const MAX_THEMES: usize = 20;

/// Maximum length of a sanitized theme name
pub const MAX_THEME_NAME_LEN: usize = 30;

/// Read-only baseline profile, never persisted as an editable blob
pub const DEFAULT_THEME: &str = "default";

/// First user-editable profile, created lazily on first edit
pub const CUSTOM_THEME: &str = "custom";

/// Name substituted when an imported document carries an unusable name
pub const IMPORTED_THEME_NAME: &str = "Imported Theme";

/// Settings key holding the name of the profile a snapshot belongs to
pub const THEME_MODE_KEY: &str = "themeMode";

/// Settings key for the expanded theme-controls panel
pub const STYLE_EXPANDED_KEY: &str = "styleExpanded";

/// Build the full default settings map.
pub fn default_settings_map() -> Map<String, Value> {
    let value = json!({
        "fontFamily": "system-ui",
        "themeMode": DEFAULT_THEME,
        "displayLabel": true,
        "displayShortcuts": true,
        "tabBrowserMode": "disabled",
        "customBgColor": "",
        "customFgColor": "",
        "customAccentColor": "",
        "customBorderRadius": 10,
        "customAnimationSpeed": 0.3,
        "uiMoreBlur": false,
        "shortcutTitlesHover": false,
        "shortcutScaleHover": false,
        "styleExpanded": false,
        "labelFontSize": 48,
        "labelPosition": "top",
        "scaling": 100,
        "greetingType": "none",
        "userName": "",
        "maxShortcuts": 24,
        "gridColumns": 8
    });

    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
