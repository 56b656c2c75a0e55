//! Named state transitions of the theme registry.
//!
//! Each successful mutation produces exactly one transition. It is logged
//! and handed to the render hook so the view can refresh.

use std::fmt;
use std::sync::Arc;

/// Callback invoked after every successful mutation.
pub type RenderHook = Arc<dyn Fn(&ThemeTransition) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeTransition {
    /// Startup resolution finished (possibly via full fallback).
    Loaded { active: String, fell_back: bool },
    /// `default --(edit of key)--> custom`, emitted once the edit is applied
    Promoted { key: String },
    Switched { from: String, to: String },
    Created { name: String },
    Imported { name: String },
    Removed { name: String, fallback: String },
    /// All user themes dropped, back to `default`.
    Reset,
    SettingChanged { theme: String, key: String },
}

impl ThemeTransition {
    /// Short verb used as the `action` log field.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Loaded { .. } => "loaded",
            Self::Promoted { .. } => "promoted",
            Self::Switched { .. } => "switched",
            Self::Created { .. } => "created",
            Self::Imported { .. } => "imported",
            Self::Removed { .. } => "removed",
            Self::Reset => "reset",
            Self::SettingChanged { .. } => "setting_changed",
        }
    }

    /// Theme the transition ends on (or acted upon).
    pub fn theme(&self) -> &str {
        match self {
            Self::Loaded { active, .. } => active,
            Self::Promoted { .. } => crate::settings::CUSTOM_THEME,
            Self::Switched { to, .. } => to,
            Self::Created { name } | Self::Imported { name } => name,
            Self::Removed { name, .. } => name,
            Self::Reset => crate::settings::DEFAULT_THEME,
            Self::SettingChanged { theme, .. } => theme,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Loaded { fell_back: true, .. } => Some("fell back to defaults".to_string()),
            Self::Switched { from, .. } => Some(format!("from {}", from)),
            Self::Removed { fallback, .. } => Some(format!("fallback {}", fallback)),
            Self::Promoted { key } | Self::SettingChanged { key, .. } => {
                Some(format!("key {}", key))
            }
            _ => None,
        }
    }

    pub(crate) fn log(&self) {
        let details = self.details();
        crate::logging::log_theme_event(self.action(), self.theme(), details.as_deref());
    }
}

impl fmt::Display for ThemeTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.details() {
            Some(details) => write!(f, "{} {} ({})", self.action(), self.theme(), details),
            None => write!(f, "{} {}", self.action(), self.theme()),
        }
    }
}
