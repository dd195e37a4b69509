//! Font-face registration port.
//!
//! Registration is fire-and-forget from the core's point of view: it submits
//! declarations to the measurement environment and waits a settle delay
//! afterwards. Failures are reported, never fatal.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{FontFaceDeclaration, LocalFaceAlias};

/// Errors that can occur while registering faces.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Font data could not be read.
    #[error("Failed to load {family}: {reason}")]
    LoadFailed { family: String, reason: String },

    /// No local face matched an alias source.
    #[error("No local face for alias {alias}")]
    UnresolvedAlias { alias: String },

    /// The environment does not accept registrations.
    #[error("Face registration is not supported")]
    NotSupported,
}

/// Port for making extra faces available to the metric prober.
#[async_trait]
pub trait FontFaceRegistryPort: Send + Sync {
    /// Register declared (delivered) faces.
    ///
    /// Returns how many declarations were applied. Partial success is
    /// reported as `Ok` with a smaller count.
    async fn register_faces(
        &self,
        faces: &[FontFaceDeclaration],
    ) -> Result<usize, RegistrationError>;

    /// Register alias families pointing at exact local faces.
    async fn register_local_aliases(
        &self,
        aliases: &[LocalFaceAlias],
    ) -> Result<usize, RegistrationError>;
}

/// A registry that accepts nothing, for hosts without registration support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFaceRegistry;

impl NoopFaceRegistry {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FontFaceRegistryPort for NoopFaceRegistry {
    async fn register_faces(
        &self,
        faces: &[FontFaceDeclaration],
    ) -> Result<usize, RegistrationError> {
        if faces.is_empty() {
            Ok(0)
        } else {
            Err(RegistrationError::NotSupported)
        }
    }

    async fn register_local_aliases(
        &self,
        _aliases: &[LocalFaceAlias],
    ) -> Result<usize, RegistrationError> {
        // Aliases only matter for preview rendering.
        Ok(0)
    }
}
