//! Font discovery core: domain types, ports and the detection pipeline.
//!
//! Adapters (system fonts, SQLite, CLI) live in their own crates and plug
//! into the ports defined here.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{
    CacheMiss, DEFAULT_FONT_WEIGHT, DEFAULT_PROBES, DetectionResult, Diagnostic, DiscoveryMethod,
    DiscoveryOutput, FaceSource, FontEntry, FontFaceDeclaration, FontFamily, FontStack, FontStyle,
    GenericFamily, LOCAL_ALIAS_PREFIX, LocalFaceAlias, Measurement, ProbeSet, Unavailability,
    build_local_aliases, display_names,
};
pub use paths::{CACHE_DB_FILE, DATA_DIR_ENV, DataRootSource, PathError, ResolvedPaths};
pub use ports::{
    CacheStorePort, CoreError, EnumerationError, FontEnumerationPort, FontFaceRegistryPort,
    MemoryCacheStore, MetricProberPort, NoopFaceRegistry, PermissionState, ProbeError,
    ProbeResult, RegistrationError, RepositoryError, UnsupportedEnumerator,
};
pub use services::{
    BaselineTable, CacheError, CacheLookup, CacheRecord, CandidateCatalog, DetectionSession,
    DiscoveryDeps, DiscoveryOptions, DiscoveryState, Evaluation, FontDiscovery,
    PresenceDetector, ResultCache, ScanReport,
};
pub use settings::{
    DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_MS, DEFAULT_REFERENCE_SIZE_PX,
    DEFAULT_SETTLE_DELAY_MS, DEFAULT_THRESHOLD_PX, DetectionSettings, SettingsError,
    SettingsUpdate, validate_settings,
};
