//! Result cache over a persistent key/value store.
//!
//! Records are keyed by `<namespace>:<fingerprint>:<client identity>` so a
//! result is never reused for a different catalog or environment. Expiry is
//! checked on read.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{CacheMiss, DetectionResult};
use crate::ports::{CacheStorePort, RepositoryError};
use crate::settings::{DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_MS};

/// Serialized form of a cached detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Creation time, epoch milliseconds.
    pub time: i64,
    pub fonts: Vec<String>,
}

/// Outcome of a cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(DetectionResult),
    Miss(CacheMiss),
}

/// Errors from saving or clearing the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] RepositoryError),

    #[error("Failed to encode cache record: {0}")]
    Encode(String),
}

/// Reads and writes cached detection results.
pub struct ResultCache {
    store: Arc<dyn CacheStorePort>,
    namespace: String,
    ttl_ms: i64,
}

impl ResultCache {
    pub fn new(store: Arc<dyn CacheStorePort>) -> Self {
        Self::with_policy(store, DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_MS)
    }

    pub fn with_policy(
        store: Arc<dyn CacheStorePort>,
        namespace: impl Into<String>,
        ttl_ms: i64,
    ) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            ttl_ms,
        }
    }

    /// Store key for a fingerprint and client identity.
    pub fn key(&self, fingerprint: &str, client_id: &str) -> String {
        format!("{}:{fingerprint}:{client_id}", self.namespace)
    }

    pub async fn load(&self, fingerprint: &str, client_id: &str) -> CacheLookup {
        self.load_at(fingerprint, client_id, now_ms()).await
    }

    /// Read a record as of `now_ms`.
    pub async fn load_at(&self, fingerprint: &str, client_id: &str, now_ms: i64) -> CacheLookup {
        let key = self.key(fingerprint, client_id);

        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return CacheLookup::Miss(CacheMiss::NotFound),
            Err(e) => return CacheLookup::Miss(CacheMiss::StoreUnavailable(e.to_string())),
        };

        let record: CacheRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => return CacheLookup::Miss(CacheMiss::Malformed(e.to_string())),
        };

        // Records from the future (clock skew) are accepted.
        let age_ms = now_ms.saturating_sub(record.time);
        if age_ms > self.ttl_ms {
            debug!(key = %key, age_ms, "Cached result expired");
            return CacheLookup::Miss(CacheMiss::Expired { age_ms });
        }

        CacheLookup::Hit(DetectionResult::from_names(record.fonts))
    }

    pub async fn save(
        &self,
        fingerprint: &str,
        client_id: &str,
        result: &DetectionResult,
    ) -> Result<(), CacheError> {
        self.save_at(fingerprint, client_id, result, now_ms()).await
    }

    /// Write a record stamped with `time_ms`.
    pub async fn save_at(
        &self,
        fingerprint: &str,
        client_id: &str,
        result: &DetectionResult,
        time_ms: i64,
    ) -> Result<(), CacheError> {
        let record = CacheRecord {
            time: time_ms,
            fonts: result.names().to_vec(),
        };
        let value = serde_json::to_string(&record).map_err(|e| CacheError::Encode(e.to_string()))?;
        self.store.set(&self.key(fingerprint, client_id), &value).await?;
        Ok(())
    }

    /// Remove every record in this cache's namespace.
    pub async fn clear(&self) -> Result<u64, CacheError> {
        let removed = self
            .store
            .remove_prefix(&format!("{}:", self.namespace))
            .await?;
        Ok(removed)
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
