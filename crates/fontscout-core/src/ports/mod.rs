//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from the
//! environment it runs in. They contain no implementation details and use
//! only domain types.
//!
//! # Design Rules
//!
//! - No rendering-surface, database or font-library types in any signature
//! - Measurement is synchronous; every other port is async
//! - Failures are typed so callers can tell "no data" from "data unavailable"

pub mod cache_store;
pub mod enumeration;
pub mod face_registry;
pub mod prober;

use thiserror::Error;

pub use cache_store::{CacheStorePort, MemoryCacheStore};
pub use enumeration::{
    EnumerationError, FontEnumerationPort, PermissionState, UnsupportedEnumerator,
};
#[cfg(test)]
pub use enumeration::MockFontEnumerationPort;
pub use face_registry::{FontFaceRegistryPort, NoopFaceRegistry, RegistrationError};
pub use prober::{MetricProberPort, ProbeError, ProbeResult};

/// Domain-specific errors for storage operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Core error type for semantic domain errors.
///
/// Detection itself never fails; building an orchestrator from invalid
/// settings does. Adapters map this to their own error types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),
}
