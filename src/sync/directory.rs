//! Directory-backed sync mirror.
//!
//! Each key is one pretty-printed JSON file. Point the directory at a synced
//! folder to carry themes between machines.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::SyncMirror;
use crate::error::StoreError;

#[derive(Debug, Clone)]
pub struct DirectoryMirror {
    root: PathBuf,
}

impl DirectoryMirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_`,
    /// with a SHA-256 tag of the original key appended so distinct keys
    /// never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let file_name = if safe == key {
            format!("{}.json", safe)
        } else {
            format!("{}-{}.json", safe, key_tag(key))
        };
        self.root.join(file_name)
    }

    fn restore_sync(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&content)?;
        debug!(key = key, path = %path.display(), "Restored from sync mirror");
        Ok(Some(value))
    }

    fn backup_sync(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;

        let path = self.path_for(key);
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)?;
        debug!(key = key, path = %path.display(), "Backed up to sync mirror");
        Ok(())
    }
}

/// First 16 hex chars (64 bits) of the key's SHA-256.
fn key_tag(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    hex::encode(&digest[..8])
}

#[async_trait]
impl SyncMirror for DirectoryMirror {
    async fn restore(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.restore_sync(key)
    }

    async fn backup(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.backup_sync(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn restore_missing_returns_none() {
        let dir = tempdir().unwrap();
        let mirror = DirectoryMirror::new(dir.path().join("sync"));
        assert_eq!(mirror.restore("themeList").await.unwrap(), None);
    }

    #[tokio::test]
    async fn backup_creates_directory_and_roundtrips() {
        let dir = tempdir().unwrap();
        let mirror = DirectoryMirror::new(dir.path().join("nested").join("sync"));

        let list = json!(["default", "custom", "Ocean"]);
        mirror.backup("themeList", &list).await.unwrap();

        assert!(mirror.root().exists());
        assert_eq!(mirror.restore("themeList").await.unwrap(), Some(list));
    }

    #[test]
    fn keys_map_to_distinct_safe_files() {
        let mirror = DirectoryMirror::new("/tmp/mirror");

        assert_eq!(
            mirror.path_for("activeTheme"),
            PathBuf::from("/tmp/mirror/activeTheme.json")
        );

        let spaced = mirror.path_for("theme_My Theme");
        let underscored = mirror.path_for("theme_My_Theme");
        assert_ne!(spaced, underscored);
        let name = spaced.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("theme_My_Theme-"));
        assert!(!name.contains(' '));
    }

    #[tokio::test]
    async fn names_differing_in_space_or_underscore_keep_separate_files() {
        let dir = tempdir().unwrap();
        let mirror = DirectoryMirror::new(dir.path());
        let spaced = "theme_a _ _  _____ __   ___b";
        let underscored = "theme_a_ ___ _   _  __   __b";

        assert_ne!(mirror.path_for(spaced), mirror.path_for(underscored));

        mirror.backup(spaced, &json!({ "fontFamily": "Arial" })).await.unwrap();
        mirror
            .backup(underscored, &json!({ "fontFamily": "Courier" }))
            .await
            .unwrap();

        assert_eq!(
            mirror.restore(spaced).await.unwrap(),
            Some(json!({ "fontFamily": "Arial" }))
        );
        assert_eq!(
            mirror.restore(underscored).await.unwrap(),
            Some(json!({ "fontFamily": "Courier" }))
        );
    }

    #[test]
    fn every_space_underscore_variant_gets_its_own_file() {
        let mirror = DirectoryMirror::new("/tmp/mirror");
        let mut seen = std::collections::HashSet::new();
        for mask in 0u32..(1 << 12) {
            let middle: String = (0..12)
                .map(|bit| if mask & (1 << bit) == 0 { ' ' } else { '_' })
                .collect();
            let key = format!("theme_a{}b", middle);
            assert!(seen.insert(mirror.path_for(&key)), "shared file for {:?}", key);
        }
    }

    #[test]
    fn tag_is_sixteen_hex_chars() {
        let tag = key_tag("theme_My Theme");
        assert_eq!(tag.len(), 16);
        assert!(tag.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let mirror = DirectoryMirror::new(dir.path());
        fs::write(mirror.path_for("activeTheme"), "{not json").unwrap();

        let err = mirror.restore("activeTheme").await.unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
