//! Persistent key/value store port used by the result cache.
//!
//! Keys are plain strings (`<namespace>:<fingerprint>:<clientIdentity>`),
//! values are opaque serialized records. Expiry is enforced by the core at
//! read time, never by the store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::RepositoryError;

/// Key/value persistence for cached detection results.
///
/// # Design Rules
///
/// - No storage-specific types in signatures
/// - Values are stored verbatim; the store never parses them
#[async_trait]
pub trait CacheStorePort: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    /// Create or overwrite the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;

    /// Remove every key starting with `prefix`. Returns the number removed.
    async fn remove_prefix(&self, prefix: &str) -> Result<u64, RepositoryError>;
}

/// Process-local store, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, RepositoryError> {
        self.entries
            .lock()
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStorePort for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<u64, RepositoryError> {
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - entries.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_overwrite() {
        let store = MemoryCacheStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_prefix_only_touches_namespace() {
        let store = MemoryCacheStore::new();
        store.set("ns:a:client", "1").await.unwrap();
        store.set("ns:b:client", "2").await.unwrap();
        store.set("other:a:client", "3").await.unwrap();

        let removed = store.remove_prefix("ns:").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.get("other:a:client").await.unwrap().as_deref(), Some("3"));
    }
}
