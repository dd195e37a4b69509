//! `SQLite` implementation of the `CacheStorePort` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use fontscout_core::{CacheStorePort, RepositoryError};

/// `SQLite` implementation of the `CacheStorePort` trait.
///
/// Values are stored verbatim in a key-value table.
pub struct SqliteCacheStore {
    pool: SqlitePool,
}

impl SqliteCacheStore {
    /// Create a new `SQLite` cache store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ensure the cache table exists.
    ///
    /// Call this during initialization to set up the schema.
    pub async fn ensure_table(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cache_kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CacheStorePort for SqliteCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM cache_kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query("INSERT OR REPLACE INTO cache_kv (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(&updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<u64, RepositoryError> {
        // substr() instead of LIKE: namespaces contain '_'.
        let result = sqlx::query("DELETE FROM cache_kv WHERE substr(key, 1, length(?1)) = ?1")
            .bind(prefix)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_store;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = setup_test_store().await.unwrap();
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = setup_test_store().await.unwrap();
        store.set("k", "one").await.unwrap();
        store.set("k", "two").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cache_kv")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_remove_prefix_treats_underscore_literally() {
        let store = setup_test_store().await.unwrap();
        store.set("fontDetectCache_v1:a:c", "1").await.unwrap();
        store.set("fontDetectCache_v1:b:c", "2").await.unwrap();
        store.set("fontDetectCacheXv1:a:c", "3").await.unwrap();

        let removed = store.remove_prefix("fontDetectCache_v1:").await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(
            store.get("fontDetectCacheXv1:a:c").await.unwrap().as_deref(),
            Some("3")
        );
    }

    #[tokio::test]
    async fn test_missing_table_is_a_storage_error() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let store = SqliteCacheStore::new(pool);

        tokio_test::assert_err!(store.get("k").await);
    }
}
