use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{Collection, ConfigStore};
use crate::error::StoreError;

/// In-process store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(Collection, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous peek, handy for assertions.
    pub fn snapshot(&self, collection: Collection, key: &str) -> Option<Value> {
        self.entries
            .lock()
            .get(&(collection, key.to_string()))
            .cloned()
    }

    /// Keys currently stored in a collection, sorted.
    pub fn keys(&self, collection: Collection) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .keys()
            .filter(|(c, _)| *c == collection)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.snapshot(collection, key))
    }

    async fn set(
        &self,
        collection: Collection,
        key: &str,
        value: &Value,
    ) -> Result<(), StoreError> {
        self.entries
            .lock()
            .insert((collection, key.to_string()), value.clone());
        Ok(())
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(&(collection, key.to_string()));
        Ok(())
    }
}
