//! Core services - the detection pipeline.
//!
//! Services orchestrate between ports (trait interfaces) and domain logic.
//! They never know about concrete adapters.

mod baseline;
mod cache;
mod catalog;
mod detector;
mod discovery;
mod session;

pub use baseline::BaselineTable;
pub use cache::{CacheError, CacheLookup, CacheRecord, ResultCache};
pub use catalog::CandidateCatalog;
pub use detector::{Evaluation, PresenceDetector};
pub use discovery::{DiscoveryDeps, DiscoveryOptions, DiscoveryState, FontDiscovery};
pub use session::{DetectionSession, ScanReport};
