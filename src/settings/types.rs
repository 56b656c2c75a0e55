//! Settings type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::defaults::{default_settings_map, STYLE_EXPANDED_KEY, THEME_MODE_KEY};

/// The active settings object: option name -> scalar value.
///
/// Always fully populated. Keys outside the default set are kept as-is so
/// imported documents from newer versions survive a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Default for Settings {
    fn default() -> Self {
        Self(default_settings_map())
    }
}

impl Settings {
    /// Defaults with `themeMode` stamped to `theme`.
    pub fn defaults_for(theme: &str) -> Self {
        let mut settings = Self::default();
        settings.set_theme_mode(theme);
        settings
    }

    /// Merge a patch over the full default set (patch wins on conflicts).
    ///
    /// Non-scalar patch values are skipped, leaving the default in place.
    pub fn merged_over_defaults(patch: &Map<String, Value>) -> Self {
        let mut settings = Self::default();
        for (key, value) in patch.iter().filter(|(_, value)| is_scalar(value)) {
            settings.0.insert(key.clone(), value.clone());
        }
        settings
    }

    /// Rebuild settings from a stored blob.
    ///
    /// Returns None when the blob is not a JSON object.
    pub fn from_stored(value: &Value) -> Option<Self> {
        value.as_object().map(Self::merged_over_defaults)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn theme_mode(&self) -> Option<&str> {
        self.0.get(THEME_MODE_KEY).and_then(Value::as_str)
    }

    pub fn set_theme_mode(&mut self, theme: &str) {
        self.0
            .insert(THEME_MODE_KEY.to_string(), Value::String(theme.to_string()));
    }

    pub fn style_expanded(&self) -> bool {
        self.0
            .get(STYLE_EXPANDED_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// JSON value written to the store and the mirror.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Copy of the map without `themeMode`, for comparing snapshots of
    /// different profiles.
    pub fn without_theme_mode(&self) -> Map<String, Value> {
        let mut map = self.0.clone();
        map.remove(THEME_MODE_KEY);
        map
    }
}

/// Settings values are strings, booleans, integers or floats.
pub fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Bool(_) | Value::Number(_))
}
