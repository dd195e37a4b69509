//! Detection settings and validation.
//!
//! Pure configuration types with no infrastructure dependencies. Adapters
//! load them (JSON file, CLI flags) and must validate before use.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_PROBES, ProbeSet};

/// Reference text size, large enough that sub-pixel rounding does not mask
/// genuine metric differences.
pub const DEFAULT_REFERENCE_SIZE_PX: f32 = 72.0;

/// Minimum per-axis difference (in pixels at the reference size) that counts
/// as divergence.
pub const DEFAULT_THRESHOLD_PX: f32 = 1.0;

/// Cached results expire after seven days.
pub const DEFAULT_CACHE_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Namespace prefix of cache keys.
pub const DEFAULT_CACHE_NAMESPACE: &str = "fontDetectCache_v1";

/// Wait after registering declared faces before measuring.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Settings for one detection session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Text size used for every measurement.
    pub reference_size_px: f32,

    /// Divergence threshold in pixels.
    pub threshold_px: f32,

    /// Time-to-live of cached results in milliseconds.
    pub cache_ttl_ms: i64,

    /// Cache key namespace. Bump it to invalidate every stored result.
    pub cache_namespace: String,

    /// Settle delay after face registration, in milliseconds.
    pub settle_delay_ms: u64,

    /// Probe strings, in iteration order.
    pub probes: Vec<String>,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            reference_size_px: DEFAULT_REFERENCE_SIZE_PX,
            threshold_px: DEFAULT_THRESHOLD_PX,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            cache_namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            probes: DEFAULT_PROBES.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

impl DetectionSettings {
    /// The probe strings as a validated set.
    pub fn probe_set(&self) -> Result<ProbeSet, SettingsError> {
        ProbeSet::new(self.probes.iter().cloned()).ok_or(SettingsError::EmptyProbeSet)
    }

    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Merge a partial update, only touching fields that are `Some`.
    pub fn merge(&mut self, update: &SettingsUpdate) {
        if let Some(size) = update.reference_size_px {
            self.reference_size_px = size;
        }
        if let Some(threshold) = update.threshold_px {
            self.threshold_px = threshold;
        }
        if let Some(ttl) = update.cache_ttl_ms {
            self.cache_ttl_ms = ttl;
        }
        if let Some(ref namespace) = update.cache_namespace {
            self.cache_namespace.clone_from(namespace);
        }
        if let Some(delay) = update.settle_delay_ms {
            self.settle_delay_ms = delay;
        }
        if let Some(ref probes) = update.probes {
            self.probes.clone_from(probes);
        }
    }
}

/// Partial settings update (CLI flags, environment overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub reference_size_px: Option<f32>,
    pub threshold_px: Option<f32>,
    pub cache_ttl_ms: Option<i64>,
    pub cache_namespace: Option<String>,
    pub settle_delay_ms: Option<u64>,
    pub probes: Option<Vec<String>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Reference size must be a positive number of pixels, got {0}")]
    InvalidReferenceSize(f32),

    #[error("Divergence threshold must be a positive number of pixels, got {0}")]
    InvalidThreshold(f32),

    #[error("Cache TTL must be positive, got {0} ms")]
    InvalidCacheTtl(i64),

    #[error("Cache namespace must be non-empty and must not contain ':', got {0:?}")]
    InvalidNamespace(String),

    #[error("At least one probe string is required")]
    EmptyProbeSet,

    #[error("Probe strings cannot be blank")]
    BlankProbe,
}

/// Validate settings values.
pub fn validate_settings(settings: &DetectionSettings) -> Result<(), SettingsError> {
    if !(settings.reference_size_px.is_finite() && settings.reference_size_px > 0.0) {
        return Err(SettingsError::InvalidReferenceSize(settings.reference_size_px));
    }

    if !(settings.threshold_px.is_finite() && settings.threshold_px > 0.0) {
        return Err(SettingsError::InvalidThreshold(settings.threshold_px));
    }

    if settings.cache_ttl_ms <= 0 {
        return Err(SettingsError::InvalidCacheTtl(settings.cache_ttl_ms));
    }

    let namespace = settings.cache_namespace.trim();
    if namespace.is_empty() || namespace.contains(':') {
        return Err(SettingsError::InvalidNamespace(
            settings.cache_namespace.clone(),
        ));
    }

    if settings.probes.is_empty() {
        return Err(SettingsError::EmptyProbeSet);
    }

    if settings.probes.iter().any(|p| p.trim().is_empty()) {
        return Err(SettingsError::BlankProbe);
    }

    Ok(())
}
