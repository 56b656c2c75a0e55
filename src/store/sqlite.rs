//! SQLite Storage Layer
//!
//! Durable key-value persistence for theme state. One table keyed by
//! (collection, key) with JSON text values.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::{debug, info};

use super::{Collection, ConfigStore};
use crate::error::StoreError;

/// SQLite-backed [`ConfigStore`].
///
/// Queries run inline on the calling task; each is a single-row statement.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode for better write performance
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let store = Self::with_connection(conn)?;
        info!(db_path = %path.display(), "Settings database initialized");
        Ok(store)
    }

    /// In-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            );
            "#,
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn get_sync(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError> {
        let conn = self.conn.lock();
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv WHERE collection = ?1 AND key = ?2",
                params![collection.as_str(), key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set_sync(&self, collection: Collection, key: &str, value: &Value) -> Result<(), StoreError> {
        let text = serde_json::to_string(value)?;
        let conn = self.conn.lock();
        conn.execute(
            r#"
            INSERT INTO kv (collection, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(collection, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![collection.as_str(), key, text, Utc::now().to_rfc3339()],
        )?;

        debug!(collection = %collection, key = key, "Stored value");
        Ok(())
    }

    fn delete_sync(&self, collection: Collection, key: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        let removed = conn.execute(
            "DELETE FROM kv WHERE collection = ?1 AND key = ?2",
            params![collection.as_str(), key],
        )?;

        debug!(collection = %collection, key = key, removed = removed, "Deleted value");
        Ok(())
    }

    /// Keys stored in a collection, sorted.
    pub fn keys(&self, collection: Collection) -> Result<Vec<String>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT key FROM kv WHERE collection = ?1 ORDER BY key")?;
        let keys = stmt
            .query_map(params![collection.as_str()], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

#[async_trait]
impl ConfigStore for SqliteStore {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError> {
        self.get_sync(collection, key)
    }

    async fn set(
        &self,
        collection: Collection,
        key: &str,
        value: &Value,
    ) -> Result<(), StoreError> {
        self.set_sync(collection, key, value)
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StoreError> {
        self.delete_sync(collection, key)
    }
}
