//! Theme registry
//!
//! Single owner of the `{settings, active theme, theme list}` triad and of
//! every read/write of theme data to the local store and the sync mirror.
//!
//! Invariants kept by every operation:
//! - the theme list always contains `default` and `custom` and holds at most
//!   [`MAX_THEMES`] entries
//! - the active theme is a member of the theme list (or `default`)
//! - `settings.themeMode` names the active theme
//!
//! Operations take `&mut self`, so one registry never interleaves two of
//! them. Store writes are awaited in order; a failed write is logged and the
//! in-memory change stands.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::document::ThemeDocument;
use super::names;
use super::transition::{RenderHook, ThemeTransition};
use crate::error::{log_async_err, Result, ResultExt, StoreError, ThemeError};
use crate::settings::{Settings, CUSTOM_THEME, DEFAULT_THEME, IMPORTED_THEME_NAME, MAX_THEMES};
use crate::store::{theme_key, Collection, ConfigStore, ACTIVE_THEME_KEY, THEME_LIST_KEY};
use crate::sync::{NoopMirror, SyncMirror};

/// The initial theme list: `['default', 'custom']`.
pub fn default_theme_list() -> Vec<String> {
    vec![DEFAULT_THEME.to_string(), CUSTOM_THEME.to_string()]
}

/// `default` and `custom` can't be removed.
pub fn is_protected(name: &str) -> bool {
    name == DEFAULT_THEME || name == CUSTOM_THEME
}

/// Theme to activate after removing `removed` from `original`.
///
/// The entry just before the removed one in the pre-removal order, provided
/// it is still in `remaining`; otherwise `custom`.
pub fn fallback_theme(original: &[String], removed: &str, remaining: &[String]) -> String {
    original
        .iter()
        .position(|t| t == removed)
        .filter(|&index| index > 0)
        .map(|index| &original[index - 1])
        .filter(|candidate| remaining.contains(*candidate))
        .cloned()
        .unwrap_or_else(|| CUSTOM_THEME.to_string())
}

/// Keep string entries, drop duplicates, and make sure the reserved
/// profiles lead the list.
fn normalize_theme_list(raw: &[Value]) -> Vec<String> {
    let mut list: Vec<String> = Vec::with_capacity(raw.len() + 2);
    for entry in raw.iter().filter_map(Value::as_str) {
        if !list.iter().any(|t| t == entry) {
            list.push(entry.to_string());
        }
    }

    for (index, reserved) in [DEFAULT_THEME, CUSTOM_THEME].into_iter().enumerate() {
        if !list.iter().any(|t| t == reserved) {
            list.insert(index.min(list.len()), reserved.to_string());
        }
    }
    list
}

fn list_value(list: &[String]) -> Value {
    Value::Array(list.iter().cloned().map(Value::String).collect())
}

/// Triad resolved by a successful load.
struct LoadedState {
    theme_list: Vec<String>,
    active_theme: String,
    settings: Settings,
}

pub struct ThemeRegistry {
    store: Arc<dyn ConfigStore>,
    mirror: Arc<dyn SyncMirror>,
    pub(super) settings: Settings,
    pub(super) active_theme: String,
    theme_list: Vec<String>,
    render_hook: Option<RenderHook>,
}

impl std::fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("active_theme", &self.active_theme)
            .field("theme_list", &self.theme_list)
            .field("mirror_available", &self.mirror.is_available())
            .finish_non_exhaustive()
    }
}

impl ThemeRegistry {
    /// Registry in its pre-load state: `default` active, default settings.
    pub fn new(store: Arc<dyn ConfigStore>, mirror: Arc<dyn SyncMirror>) -> Self {
        Self {
            store,
            mirror,
            settings: Settings::default(),
            active_theme: DEFAULT_THEME.to_string(),
            theme_list: default_theme_list(),
            render_hook: None,
        }
    }

    /// Registry without a sync mirror.
    pub fn local_only(store: Arc<dyn ConfigStore>) -> Self {
        Self::new(store, Arc::new(NoopMirror))
    }

    pub fn with_render_hook(mut self, hook: RenderHook) -> Self {
        self.render_hook = Some(hook);
        self
    }

    pub fn set_render_hook(&mut self, hook: Option<RenderHook>) {
        self.render_hook = hook;
    }

    // ===== Queries =====

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn active_theme(&self) -> &str {
        &self.active_theme
    }

    pub fn theme_list(&self) -> &[String] {
        &self.theme_list
    }

    pub fn is_at_capacity(&self) -> bool {
        self.theme_list.len() >= MAX_THEMES
    }

    pub fn has_mirror(&self) -> bool {
        self.mirror.is_available()
    }

    // ===== Load =====

    /// Resolve the triad at startup: local store, then mirror, then defaults.
    ///
    /// Never fails. If reading the local store errors out, the whole triad
    /// falls back to defaults.
    pub async fn load(&mut self) {
        let fell_back = match self.try_load().await {
            Ok(loaded) => {
                self.theme_list = loaded.theme_list;
                self.active_theme = loaded.active_theme;
                self.settings = loaded.settings;
                false
            }
            Err(err) => {
                warn!(error = %err, "Failed to load theme state, starting fresh");
                self.theme_list = default_theme_list();
                self.active_theme = DEFAULT_THEME.to_string();
                self.settings = Settings::default();
                true
            }
        };

        info!(
            active_theme = %self.active_theme,
            theme_count = self.theme_list.len(),
            fell_back = fell_back,
            "Theme state loaded"
        );
        self.emit(ThemeTransition::Loaded {
            active: self.active_theme.clone(),
            fell_back,
        });
    }

    async fn try_load(&self) -> std::result::Result<LoadedState, StoreError> {
        let theme_list = match self.resolve(THEME_LIST_KEY).await? {
            Some(Value::Array(entries)) => normalize_theme_list(&entries),
            other => {
                if other.is_some() {
                    warn!("Stored theme list is not an array, resetting");
                }
                let list = default_theme_list();
                self.seed(THEME_LIST_KEY, &list_value(&list)).await;
                list
            }
        };

        let active_theme = match self.resolve(ACTIVE_THEME_KEY).await? {
            Some(Value::String(name)) if theme_list.contains(&name) => name,
            other => {
                if other.is_some() {
                    debug!("Stored active theme is not in the theme list, using default");
                }
                self.seed(ACTIVE_THEME_KEY, &Value::String(DEFAULT_THEME.to_string()))
                    .await;
                DEFAULT_THEME.to_string()
            }
        };

        // The baseline is never read from storage
        let mut settings = if active_theme == DEFAULT_THEME {
            Settings::default()
        } else {
            self.resolve(&theme_key(&active_theme))
                .await?
                .as_ref()
                .and_then(Settings::from_stored)
                .unwrap_or_default()
        };
        settings.set_theme_mode(&active_theme);

        Ok(LoadedState {
            theme_list,
            active_theme,
            settings,
        })
    }

    /// Local value, else the mirror's copy (written back locally).
    async fn resolve(&self, key: &str) -> std::result::Result<Option<Value>, StoreError> {
        if let Some(value) = self.store.get(Collection::Settings, key).await? {
            return Ok(Some(value));
        }

        if !self.mirror.is_available() {
            return Ok(None);
        }

        let restored = self.mirror.restore(key).await.warn_on_err().flatten();
        if let Some(value) = &restored {
            info!(key = key, "Restored from sync mirror");
            self.seed(key, value).await;
        }
        Ok(restored)
    }

    /// Local-only write used while resolving state at load.
    async fn seed(&self, key: &str, value: &Value) {
        if let Err(err) = self.store.set(Collection::Settings, key, value).await {
            crate::logging::log_persistence_error("seed", key, &err.to_string());
        }
    }

    // ===== Persistence =====

    /// Write to the store, then mirror. Failures are logged only.
    async fn persist(&self, key: &str, value: &Value) {
        if let Err(err) = self.store.set(Collection::Settings, key, value).await {
            crate::logging::log_persistence_error("set", key, &err.to_string());
        }
        self.mirror.backup(key, value).await.warn_on_err();
    }

    async fn persist_theme_list(&self) {
        self.persist(THEME_LIST_KEY, &list_value(&self.theme_list))
            .await;
    }

    pub(super) async fn persist_active_theme(&self) {
        self.persist(ACTIVE_THEME_KEY, &Value::String(self.active_theme.clone()))
            .await;
    }

    async fn persist_settings(&self, theme: &str, settings: &Settings) {
        self.persist(&theme_key(theme), &settings.to_value()).await;
    }

    /// Save the active settings under the active theme's key.
    pub(super) async fn persist_active_settings(&self) {
        self.persist_settings(&self.active_theme, &self.settings)
            .await;
    }

    /// Local read where a failure counts as "absent".
    async fn read_local(&self, key: &str) -> Option<Value> {
        self.store
            .get(Collection::Settings, key)
            .await
            .warn_on_err()
            .flatten()
    }

    pub(super) fn emit(&self, transition: ThemeTransition) {
        transition.log();
        if let Some(hook) = &self.render_hook {
            hook(&transition);
        }
    }

    // ===== Create / Import =====

    /// Snapshot the active settings as a new named theme and activate it.
    ///
    /// Returns the final (possibly disambiguated) name.
    pub async fn create(&mut self, raw_name: &str) -> Result<String> {
        if self.is_at_capacity() {
            return Err(ThemeError::capacity());
        }

        let name = names::validate(raw_name)?;
        let name = names::unique_name(&name, &self.theme_list);

        let mut snapshot = self.settings.clone();
        snapshot.set_theme_mode(&name);
        self.add_theme(&name, snapshot).await;

        self.emit(ThemeTransition::Created { name: name.clone() });
        Ok(name)
    }

    /// Add a theme from an exported document and activate it.
    ///
    /// An unusable name becomes "Imported Theme". Imported settings are
    /// merged over the defaults.
    pub async fn import(&mut self, document: ThemeDocument) -> Result<String> {
        let base = match names::validate(&document.name) {
            Ok(name) => name,
            Err(reason) => {
                info!(
                    requested = %document.name,
                    reason = %reason,
                    "Imported theme name rejected, substituting"
                );
                IMPORTED_THEME_NAME.to_string()
            }
        };
        let name = names::unique_name(&base, &self.theme_list);

        if self.is_at_capacity() {
            return Err(ThemeError::capacity());
        }

        let mut settings = Settings::merged_over_defaults(&document.settings);
        settings.set_theme_mode(&name);
        self.add_theme(&name, settings).await;

        if document.author.is_empty() {
            info!(theme = %name, "Theme imported");
        } else {
            info!(theme = %name, author = %document.author, "Theme imported");
        }
        self.emit(ThemeTransition::Imported { name: name.clone() });
        Ok(name)
    }

    /// Parse document text and import it.
    pub async fn import_json(&mut self, text: &str) -> Result<String> {
        let document = ThemeDocument::parse(text)?;
        self.import(document).await
    }

    /// Shared tail of create/import: persist blob, append, activate.
    async fn add_theme(&mut self, name: &str, settings: Settings) {
        self.persist_settings(name, &settings).await;
        self.theme_list.push(name.to_string());
        self.persist_theme_list().await;
        self.active_theme = name.to_string();
        self.settings = settings;
        self.persist_active_theme().await;
    }

    // ===== Export =====

    /// Document for the active settings. A blank `name` uses the active
    /// theme's name. Pure, no I/O.
    pub fn export(&self, name: &str, author: &str, description: &str) -> ThemeDocument {
        let name = match name.trim() {
            "" => self.active_theme.as_str(),
            trimmed => trimmed,
        };
        ThemeDocument::from_settings(name, author.trim(), description.trim(), &self.settings)
    }

    /// Pretty JSON text of [`Self::export`].
    pub fn export_json(&self, name: &str, author: &str, description: &str) -> Result<String> {
        self.export(name, author, description).to_pretty_json()
    }

    // ===== Switch =====

    /// Activate `name`, loading its blob from the local store.
    ///
    /// Pending `custom` edits are saved before leaving it.
    pub async fn switch_to(&mut self, name: &str) -> Result<()> {
        if name != DEFAULT_THEME && !self.theme_list.iter().any(|t| t == name) {
            return Err(ThemeError::UnknownTheme(name.to_string()));
        }

        let from = self.active_theme.clone();
        self.activate(name).await;
        self.emit(ThemeTransition::Switched {
            from,
            to: name.to_string(),
        });
        Ok(())
    }

    async fn activate(&mut self, name: &str) {
        // Must land before the incoming blob is read
        if self.active_theme == CUSTOM_THEME {
            self.persist_active_settings().await;
        }

        self.active_theme = name.to_string();
        self.persist_active_theme().await;

        let mut settings = if name == DEFAULT_THEME {
            Settings::default()
        } else {
            self.read_local(&theme_key(name))
                .await
                .as_ref()
                .and_then(Settings::from_stored)
                .unwrap_or_default()
        };
        settings.set_theme_mode(name);
        self.settings = settings;
    }

    // ===== Remove / Reset =====

    /// Delete the active theme and fall back to its predecessor.
    ///
    /// No-op for `default` and `custom`. Returns the fallback theme when a
    /// theme was removed.
    pub async fn remove(&mut self) -> Option<String> {
        let removed = self.active_theme.clone();
        if is_protected(&removed) {
            debug!(theme = %removed, "Refusing to remove protected theme");
            return None;
        }

        let original = self.theme_list.clone();

        log_async_err(
            self.store
                .delete(Collection::Settings, &theme_key(&removed))
                .await,
            "delete theme blob",
        );
        self.theme_list.retain(|t| *t != removed);
        self.persist_theme_list().await;

        let fallback = fallback_theme(&original, &removed, &self.theme_list);
        self.activate(&fallback).await;

        self.emit(ThemeTransition::Removed {
            name: removed,
            fallback: fallback.clone(),
        });
        Some(fallback)
    }

    /// Drop every user theme and return to the baseline.
    ///
    /// `custom` is rewritten with defaults rather than deleted.
    pub async fn reset_themes(&mut self) {
        for theme in self.theme_list.iter().filter(|t| !is_protected(t)) {
            log_async_err(
                self.store
                    .delete(Collection::Settings, &theme_key(theme))
                    .await,
                "delete theme blob",
            );
        }

        self.persist_settings(CUSTOM_THEME, &Settings::defaults_for(CUSTOM_THEME))
            .await;

        self.theme_list = default_theme_list();
        self.persist_theme_list().await;

        self.active_theme = DEFAULT_THEME.to_string();
        self.settings = Settings::default();
        self.persist_active_theme().await;

        self.emit(ThemeTransition::Reset);
    }
}
