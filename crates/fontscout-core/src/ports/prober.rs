//! Metric prober port.
//!
//! Abstracts "render this text in this font stack and tell me how big it is"
//! away from any concrete text-rendering surface. The baseline table and the
//! presence detector only ever see this trait, so they can be exercised with
//! scripted measurements.

use thiserror::Error;

use crate::domain::{FontStack, Measurement};

/// Errors a single measurement can produce.
///
/// None of these abort a detection batch; the detector treats them as
/// "no evidence of presence" for the probe in question.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// The stack could not be parsed or resolved to any face.
    #[error("Invalid font stack: {0}")]
    InvalidStack(String),

    /// A face was resolved but could not be loaded or measured.
    #[error("Measurement failed for {stack}: {reason}")]
    MeasurementFailed { stack: String, reason: String },
}

/// Result type for prober operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Port for off-screen text measurement.
///
/// Implementations must render `text` on a single line with the exact
/// fallback chain given, at `size_px`, and leave no persistent trace behind.
/// Calls are synchronous and blocking.
pub trait MetricProberPort: Send + Sync {
    /// Measure the bounding box of `text` rendered in `stack`.
    fn measure(&self, stack: &FontStack, text: &str, size_px: f32) -> ProbeResult<Measurement>;
}
