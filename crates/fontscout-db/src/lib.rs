//! SQLite-backed persistence for fontscout.
//!
//! Implements the core's `CacheStorePort` on a single key/value table.

#![deny(unsafe_code)]

pub mod repositories;
pub mod setup;

pub use repositories::SqliteCacheStore;

pub use setup::setup_cache_store;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_store;
