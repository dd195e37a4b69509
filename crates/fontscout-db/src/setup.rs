//! Database setup and initialization.
//!
//! Entry points call [`setup_cache_store`] with the resolved cache database
//! path and get back a ready-to-use store.

use anyhow::Result;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::Path;
use tracing::debug;

use crate::repositories::SqliteCacheStore;

/// Open (creating if needed) the cache database at `db_path`.
///
/// # Errors
///
/// Returns an error if the parent directory or database file cannot be
/// created, or the schema cannot be applied.
///
/// # Example
///
/// ```rust,no_run
/// use fontscout_db::setup_cache_store;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let store = setup_cache_store(Path::new("/path/to/cache.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_cache_store(db_path: &Path) -> Result<SqliteCacheStore> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true),
    )
    .await?;

    let store = SqliteCacheStore::new(pool);
    store.ensure_table().await?;
    debug!(path = %db_path.display(), "Cache database ready");
    Ok(store)
}

/// In-memory store with the production schema, for tests.
///
/// Every connection to `sqlite::memory:` is a separate database, so the
/// pool holds exactly one.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_store() -> Result<SqliteCacheStore> {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = SqliteCacheStore::new(pool);
    store.ensure_table().await?;
    Ok(store)
}
