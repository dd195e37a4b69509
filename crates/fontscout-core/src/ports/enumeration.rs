//! Privileged font enumeration port.
//!
//! The enumeration collaborator is an external capability, gated by a
//! user-granted permission, that lists locally installed faces. The core
//! treats absence, denial, emptiness and errors uniformly as "unavailable".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FontEntry;

/// Permission state of the enumeration capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Access granted; querying will not prompt.
    Granted,
    /// Not decided yet; querying may prompt the user.
    Prompt,
    /// Access denied; the capability must not be queried.
    Denied,
    /// The capability does not exist in this environment.
    Unsupported,
}

/// Errors reported by an enumeration backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnumerationError {
    /// The user declined the permission prompt.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The capability is missing.
    #[error("Local font enumeration is not supported")]
    NotSupported,

    /// The backend failed while listing faces.
    #[error("Enumeration failed: {0}")]
    Backend(String),
}

/// Port for the privileged local font enumeration capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FontEnumerationPort: Send + Sync {
    /// Current permission state. Must not prompt.
    async fn permission_state(&self) -> PermissionState;

    /// List local faces. May suspend on a permission decision of
    /// indeterminate duration.
    async fn query_local_fonts(&self) -> Result<Vec<FontEntry>, EnumerationError>;
}

/// Enumeration port for environments without the capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedEnumerator;

impl UnsupportedEnumerator {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FontEnumerationPort for UnsupportedEnumerator {
    async fn permission_state(&self) -> PermissionState {
        PermissionState::Unsupported
    }

    async fn query_local_fonts(&self) -> Result<Vec<FontEntry>, EnumerationError> {
        Err(EnumerationError::NotSupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_enumerator() {
        let enumerator = UnsupportedEnumerator::new();
        assert_eq!(
            enumerator.permission_state().await,
            PermissionState::Unsupported
        );
        tokio_test::assert_err!(enumerator.query_local_fonts().await);
    }
}
