//! Domain types for font discovery.
//!
//! Pure value types with no infrastructure dependencies.

mod discovery;
mod font;
mod probe;

pub use discovery::{
    CacheMiss, DetectionResult, Diagnostic, DiscoveryMethod, DiscoveryOutput, Unavailability,
};
pub use font::{
    DEFAULT_FONT_WEIGHT, FaceSource, FontEntry, FontFaceDeclaration, FontStyle, LOCAL_ALIAS_PREFIX,
    LocalFaceAlias, build_local_aliases, display_names,
};
pub use probe::{DEFAULT_PROBES, FontFamily, FontStack, GenericFamily, Measurement, ProbeSet};
