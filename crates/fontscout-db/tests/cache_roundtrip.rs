//! Result cache behaviour on top of the SQLite store.

use std::sync::Arc;

use fontscout_core::{CacheLookup, CacheMiss, CacheStorePort, DetectionResult, ResultCache};
use fontscout_db::setup_cache_store;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[tokio::test]
async fn result_cache_reads_back_sorted_names() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn CacheStorePort> =
        Arc::new(setup_cache_store(&dir.path().join("cache.db")).await.unwrap());
    let cache = ResultCache::new(Arc::clone(&store));

    let result = DetectionResult::from_names(["Menlo", "Arial"]);
    cache.save_at("fp", "client", &result, 1_000).await.unwrap();

    assert_eq!(
        cache.load_at("fp", "client", 1_000 + DAY_MS).await,
        CacheLookup::Hit(result)
    );
    assert_eq!(
        cache.load_at("fp", "client", 1_000 + 8 * DAY_MS).await,
        CacheLookup::Miss(CacheMiss::Expired { age_ms: 8 * DAY_MS })
    );
}

#[tokio::test]
async fn clear_only_drops_cache_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn CacheStorePort> =
        Arc::new(setup_cache_store(&dir.path().join("cache.db")).await.unwrap());
    let cache = ResultCache::new(Arc::clone(&store));

    cache
        .save("fp", "client", &DetectionResult::from_names(["Arial"]))
        .await
        .unwrap();
    store.set("unrelated", "value").await.unwrap();

    assert_eq!(cache.clear().await.unwrap(), 1);
    assert_eq!(
        cache.load("fp", "client").await,
        CacheLookup::Miss(CacheMiss::NotFound)
    );
    assert_eq!(store.get("unrelated").await.unwrap().as_deref(), Some("value"));
}
