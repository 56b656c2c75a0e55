//! Portable theme documents
//!
//! Export produces `{ name, version, author, description, settings }`.
//! Import accepts the same shape; only `name` and `settings` are required.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ThemeError;
use super::names;
use crate::settings::{is_scalar, Settings, THEME_VERSION};

/// Exported theme document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeDocument {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub settings: Map<String, Value>,
}

impl ThemeDocument {
    /// Build a document from the active settings. Pure, no I/O.
    pub fn from_settings(
        name: &str,
        author: &str,
        description: &str,
        settings: &Settings,
    ) -> Self {
        Self {
            name: name.to_string(),
            version: THEME_VERSION.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            settings: settings.as_map().clone(),
        }
    }

    /// Parse document text (file contents or pasted clipboard text).
    pub fn parse(text: &str) -> Result<Self, ThemeError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ThemeError::Format(format!("not valid JSON ({})", e)))?;
        Self::from_value(value)
    }

    /// Validate a decoded JSON value as a theme document.
    ///
    /// `name` must be a non-empty string and `settings` an object of scalar
    /// values. A missing `version` is accepted; a different one is logged
    /// and tolerated.
    pub fn from_value(value: Value) -> Result<Self, ThemeError> {
        let Value::Object(mut fields) = value else {
            return Err(missing_fields());
        };

        let name = match fields.remove("name") {
            Some(Value::String(name)) if !name.is_empty() => name,
            Some(Value::String(_)) | None | Some(Value::Null) => return Err(missing_fields()),
            Some(other) => {
                return Err(ThemeError::Format(format!(
                    "name must be a string, got {}",
                    json_type(&other)
                )))
            }
        };

        let settings = match fields.remove("settings") {
            Some(Value::Object(settings)) => settings,
            None | Some(Value::Null) => return Err(missing_fields()),
            Some(other) => {
                return Err(ThemeError::Format(format!(
                    "settings must be an object, got {}",
                    json_type(&other)
                )))
            }
        };

        if let Some((key, value)) = settings.iter().find(|(_, value)| !is_scalar(value)) {
            return Err(ThemeError::Format(format!(
                "setting '{}' must be a string, boolean or number, got {}",
                key,
                json_type(value)
            )));
        }

        let version = text_field(&mut fields, "version").unwrap_or_else(|| THEME_VERSION.to_string());
        if version != THEME_VERSION {
            warn!(
                version = %version,
                expected = THEME_VERSION,
                theme = %name,
                "Theme document has an unexpected format version"
            );
        }

        Ok(Self {
            name,
            version,
            author: text_field(&mut fields, "author").unwrap_or_default(),
            description: text_field(&mut fields, "description").unwrap_or_default(),
            settings,
        })
    }

    /// Pretty JSON text for a file or the clipboard.
    pub fn to_pretty_json(&self) -> Result<String, ThemeError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ThemeError::Format(format!("could not serialize theme ({})", e)))
    }
}

/// Download file name for an exported theme.
///
/// The name is sanitized like a theme name (so no path separators survive)
/// and whitespace runs become `-`.
pub fn export_file_name(name: &str) -> String {
    let sanitized = names::sanitize(name);
    let slug = sanitized.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        return "ntultra-theme.json".to_string();
    }
    format!("ntultra-{}.json", slug)
}

fn missing_fields() -> ThemeError {
    ThemeError::Format("missing name or settings".to_string())
}

fn text_field(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
