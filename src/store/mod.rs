//! Local key-value persistence
//!
//! The theme registry only needs get/set/delete by (collection, key).
//! Values are JSON documents.
//!
//! # Module Structure
//!
//! - `memory` - In-process store (tests, ephemeral sessions)
//! - `sqlite` - SQLite-backed durable store

mod memory;
mod sqlite;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key under which the ordered theme list is stored
pub const THEME_LIST_KEY: &str = "themeList";

/// Key under which the active theme name is stored
pub const ACTIVE_THEME_KEY: &str = "activeTheme";

/// Storage key for a theme's settings blob.
pub fn theme_key(name: &str) -> String {
    format!("theme_{}", name)
}

/// Named collections inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Settings,
    Shortcuts,
    Wallpapers,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Shortcuts => "shortcuts",
            Self::Wallpapers => "wallpapers",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embedded asynchronous key-value store.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Returns Ok(None) when the key is absent.
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, collection: Collection, key: &str, value: &Value)
        -> Result<(), StoreError>;

    /// Deleting an absent key is not an error.
    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StoreError>;
}
