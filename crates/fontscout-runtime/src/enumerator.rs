//! Local font enumeration over the system font database.

use async_trait::async_trait;
use tracing::debug;

use fontscout_core::{EnumerationError, FontEntry, FontEnumerationPort, PermissionState};

use crate::context::FontContext;
use crate::names::describe_all;

/// Lists installed faces, gated by a configured permission state.
///
/// There is no interactive permission prompt on the command line; the host
/// decides up front whether local fonts may be listed.
#[derive(Debug, Clone)]
pub struct SystemFontEnumerator {
    context: FontContext,
    permission: PermissionState,
}

impl SystemFontEnumerator {
    pub const fn new(context: FontContext, permission: PermissionState) -> Self {
        Self {
            context,
            permission,
        }
    }
}

#[async_trait]
impl FontEnumerationPort for SystemFontEnumerator {
    async fn permission_state(&self) -> PermissionState {
        self.permission
    }

    async fn query_local_fonts(&self) -> Result<Vec<FontEntry>, EnumerationError> {
        match self.permission {
            PermissionState::Denied => {
                return Err(EnumerationError::PermissionDenied(
                    "local font access denied by configuration".to_string(),
                ));
            }
            PermissionState::Unsupported => return Err(EnumerationError::NotSupported),
            PermissionState::Granted | PermissionState::Prompt => {}
        }

        // Reading every name table is blocking file I/O.
        let context = self.context.clone();
        let entries = tokio::task::spawn_blocking(move || {
            let state = context
                .read()
                .map_err(|e| EnumerationError::Backend(e.to_string()))?;
            Ok::<_, EnumerationError>(
                describe_all(&state.db)
                    .into_iter()
                    .map(|(_, entry)| entry)
                    .collect::<Vec<_>>(),
            )
        })
        .await
        .map_err(|e| EnumerationError::Backend(e.to_string()))??;

        debug!(faces = entries.len(), "Enumerated local fonts");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_denied_permission_is_reported() {
        let enumerator = SystemFontEnumerator::new(FontContext::empty(), PermissionState::Denied);
        assert_eq!(enumerator.permission_state().await, PermissionState::Denied);
        assert!(matches!(
            enumerator.query_local_fonts().await,
            Err(EnumerationError::PermissionDenied(_))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_is_reported() {
        let enumerator =
            SystemFontEnumerator::new(FontContext::empty(), PermissionState::Unsupported);
        assert_eq!(
            enumerator.query_local_fonts().await,
            Err(EnumerationError::NotSupported)
        );
    }

    #[tokio::test]
    async fn test_empty_database_lists_nothing() {
        let enumerator = SystemFontEnumerator::new(FontContext::empty(), PermissionState::Granted);
        let entries = tokio_test::assert_ok!(enumerator.query_local_fonts().await);
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_system_entries_have_families() {
        let context = FontContext::system();
        if context.is_empty() {
            return;
        }
        let enumerator = SystemFontEnumerator::new(context, PermissionState::Prompt);

        let entries = enumerator.query_local_fonts().await.unwrap();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|entry| entry.display_name().is_some()));
    }
}
