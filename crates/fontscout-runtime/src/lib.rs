//! Native adapters backed by the system font database.
//!
//! All adapters share one [`FontContext`], so faces and aliases registered
//! through [`FontdbFaceRegistry`] are immediately visible to
//! [`FontdbProber`].

#![deny(unsafe_code)]

mod context;
mod enumerator;
mod identity;
mod names;
mod prober;
mod registry;

pub use context::{FontContext, FontContextError, GenericAssignments};
pub use enumerator::SystemFontEnumerator;
pub use identity::client_identity;
pub use prober::FontdbProber;
pub use registry::FontdbFaceRegistry;
