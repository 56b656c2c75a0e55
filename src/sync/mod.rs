//! Remote backup/restore mirror
//!
//! Best-effort copy of theme state outside the local store. Callers never
//! fail because of the mirror; when no mirror is configured the registry
//! holds a [`NoopMirror`].

mod directory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

pub use directory::DirectoryMirror;

/// Optional remote backup capability.
#[async_trait]
pub trait SyncMirror: Send + Sync {
    /// Fetch a previously backed-up value. Ok(None) when nothing is stored.
    async fn restore(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn backup(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// False for the placeholder used when no mirror is configured.
    fn is_available(&self) -> bool {
        true
    }
}

/// Mirror used when the sync capability is absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMirror;

#[async_trait]
impl SyncMirror for NoopMirror {
    async fn restore(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Ok(None)
    }

    async fn backup(&self, _key: &str, _value: &Value) -> Result<(), StoreError> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn noop_mirror_restores_nothing() {
        let mirror = NoopMirror;
        assert!(!mirror.is_available());
        mirror.backup("themeList", &json!(["default"])).await.unwrap();
        assert_eq!(mirror.restore("themeList").await.unwrap(), None);
    }
}
