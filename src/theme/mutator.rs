//! Single-setting edits on the active theme.
//!
//! Editing the read-only `default` profile first takes the transition
//! `default --(first edit)--> custom`, so every change lands in an editable
//! profile without the user creating one.

use serde_json::Value;

use super::registry::ThemeRegistry;
use super::transition::ThemeTransition;
use crate::error::{Result, ThemeError};
use crate::settings::{is_scalar, CUSTOM_THEME, DEFAULT_THEME, STYLE_EXPANDED_KEY, THEME_MODE_KEY};

impl ThemeRegistry {
    /// Set `key` to `value` on the active theme and persist it.
    ///
    /// The caller re-renders once this resolves (or via the render hook).
    pub async fn update(&mut self, key: &str, value: Value) -> Result<()> {
        if key == THEME_MODE_KEY {
            return Err(ThemeError::InvalidSetting {
                key: key.to_string(),
                reason: "managed by theme switching".to_string(),
            });
        }
        if !is_scalar(&value) {
            return Err(ThemeError::InvalidSetting {
                key: key.to_string(),
                reason: "expected a string, boolean or number".to_string(),
            });
        }

        let promoted = self.active_theme == DEFAULT_THEME;
        if promoted {
            self.promote_to_custom().await;
        }

        self.settings.set(key, value);
        self.persist_active_settings().await;

        let key = key.to_string();
        self.emit(if promoted {
            ThemeTransition::Promoted { key }
        } else {
            ThemeTransition::SettingChanged {
                theme: self.active_theme.clone(),
                key,
            }
        });
        Ok(())
    }

    /// `default -> custom`, keeping the in-memory settings as the starting
    /// point of the custom profile.
    async fn promote_to_custom(&mut self) {
        self.active_theme = CUSTOM_THEME.to_string();
        self.settings.set_theme_mode(CUSTOM_THEME);
        self.persist_active_theme().await;
    }

    /// Flip the expanded theme-controls panel.
    ///
    /// A view preference rather than a theme edit: on `default` it stays in
    /// memory, elsewhere it is saved with the active theme. Returns the new
    /// state.
    pub async fn toggle_style_expanded(&mut self) -> bool {
        let expanded = !self.settings.style_expanded();
        self.settings.set(STYLE_EXPANDED_KEY, Value::Bool(expanded));

        if self.active_theme != DEFAULT_THEME {
            self.persist_active_settings().await;
        }

        self.emit(ThemeTransition::SettingChanged {
            theme: self.active_theme.clone(),
            key: STYLE_EXPANDED_KEY.to_string(),
        });
        expanded
    }
}
