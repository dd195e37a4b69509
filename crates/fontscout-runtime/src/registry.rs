//! Face registration into the shared font database.

use std::collections::HashSet;

use async_trait::async_trait;
use fontdb::ID;
use tracing::{debug, warn};

use fontscout_core::{
    FaceSource, FontFaceDeclaration, FontFaceRegistryPort, LocalFaceAlias, RegistrationError,
};

use crate::context::{FontContext, FontState};
use crate::names::describe_all;

/// Registers declared faces and local aliases so the prober can resolve them.
#[derive(Debug, Clone)]
pub struct FontdbFaceRegistry {
    context: FontContext,
}

impl FontdbFaceRegistry {
    pub const fn new(context: FontContext) -> Self {
        Self { context }
    }

    /// Run `work` on the blocking pool with the font state write-locked.
    async fn with_state<T, F>(&self, work: F) -> Result<T, RegistrationError>
    where
        T: Send + 'static,
        F: FnOnce(&mut FontState) -> Result<T, RegistrationError> + Send + 'static,
    {
        let context = self.context.clone();
        tokio::task::spawn_blocking(move || {
            let mut state = context.write().map_err(|e| failure(e.to_string()))?;
            work(&mut *state)
        })
        .await
        .map_err(|e| failure(e.to_string()))?
    }
}

fn failure(reason: String) -> RegistrationError {
    RegistrationError::LoadFailed {
        family: String::new(),
        reason,
    }
}

/// Load one declaration and return the first face it added.
fn load_face(state: &mut FontState, face: &FontFaceDeclaration) -> Result<ID, RegistrationError> {
    let before: HashSet<ID> = state.db.faces().map(|info| info.id).collect();

    match &face.source {
        FaceSource::File(path) => {
            state
                .db
                .load_font_file(path)
                .map_err(|e| RegistrationError::LoadFailed {
                    family: face.family.clone(),
                    reason: format!("{}: {e}", path.display()),
                })?;
        }
        FaceSource::Binary(data) => state.db.load_font_data(data.clone()),
    }

    state
        .db
        .faces()
        .map(|info| info.id)
        .find(|id| !before.contains(id))
        .ok_or_else(|| RegistrationError::LoadFailed {
            family: face.family.clone(),
            reason: "no font faces in data".to_string(),
        })
}

/// Load every declaration. Partial success is `Ok` with a smaller count.
fn load_faces(
    state: &mut FontState,
    faces: &[FontFaceDeclaration],
) -> Result<usize, RegistrationError> {
    let mut registered = 0;
    let mut first_error = None;

    for face in faces {
        match load_face(state, face) {
            Ok(id) => {
                debug!(family = %face.family, "Registered declared face");
                state.aliases.insert(face.family.clone(), id);
                registered += 1;
            }
            Err(e) => {
                warn!(error = %e, "Failed to register declared face");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if registered == 0 => Err(e),
        _ => Ok(registered),
    }
}

/// Point each alias at the installed face whose full or PostScript name
/// matches one of its sources, preferring the same weight and style.
fn resolve_aliases(
    state: &mut FontState,
    aliases: &[LocalFaceAlias],
) -> Result<usize, RegistrationError> {
    let described = describe_all(&state.db);
    let mut registered = 0;

    for alias in aliases {
        let matches = |source: &String| {
            described
                .iter()
                .filter(|(_, entry)| {
                    entry.full_name.as_ref() == Some(source)
                        || entry.postscript_name.as_ref() == Some(source)
                })
                .max_by_key(|(_, entry)| (entry.weight == alias.weight, entry.style == alias.style))
                .map(|(id, _)| *id)
        };

        match alias.sources.iter().find_map(matches) {
            Some(id) => {
                state.aliases.insert(alias.alias.clone(), id);
                registered += 1;
            }
            None => debug!(alias = %alias.alias, "No local face for alias"),
        }
    }

    match aliases.first() {
        Some(first) if registered == 0 => Err(RegistrationError::UnresolvedAlias {
            alias: first.alias.clone(),
        }),
        _ => Ok(registered),
    }
}

#[async_trait]
impl FontFaceRegistryPort for FontdbFaceRegistry {
    async fn register_faces(
        &self,
        faces: &[FontFaceDeclaration],
    ) -> Result<usize, RegistrationError> {
        if faces.is_empty() {
            return Ok(0);
        }
        let faces = faces.to_vec();
        self.with_state(move |state| load_faces(state, &faces)).await
    }

    async fn register_local_aliases(
        &self,
        aliases: &[LocalFaceAlias],
    ) -> Result<usize, RegistrationError> {
        if aliases.is_empty() {
            return Ok(0);
        }
        let aliases = aliases.to_vec();
        self.with_state(move |state| resolve_aliases(state, &aliases))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontscout_core::{FontStack, FontStyle, GenericFamily, MetricProberPort};

    use crate::prober::FontdbProber;

    #[tokio::test]
    async fn test_empty_requests_register_nothing() {
        let registry = FontdbFaceRegistry::new(FontContext::empty());
        assert_eq!(registry.register_faces(&[]).await, Ok(0));
        assert_eq!(registry.register_local_aliases(&[]).await, Ok(0));
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let registry = FontdbFaceRegistry::new(FontContext::empty());
        let result = registry
            .register_faces(&[FontFaceDeclaration::file("Brand", "/nonexistent/brand.ttf")])
            .await;
        assert!(matches!(result, Err(RegistrationError::LoadFailed { .. })));
    }

    #[tokio::test]
    async fn test_garbage_data_fails() {
        let registry = FontdbFaceRegistry::new(FontContext::empty());
        let result = registry
            .register_faces(&[FontFaceDeclaration::binary("Brand", vec![0, 1, 2, 3])])
            .await;
        assert!(matches!(result, Err(RegistrationError::LoadFailed { .. })));
    }

    #[tokio::test]
    async fn test_unknown_alias_is_unresolved() {
        let registry = FontdbFaceRegistry::new(FontContext::empty());
        let alias = LocalFaceAlias {
            alias: "__local_font_0".to_string(),
            sources: vec!["Nope Regular".to_string()],
            weight: 400,
            style: FontStyle::Normal,
        };
        assert_eq!(
            registry.register_local_aliases(&[alias]).await,
            Err(RegistrationError::UnresolvedAlias {
                alias: "__local_font_0".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_registered_file_is_measurable_under_declared_family() {
        let context = FontContext::system();
        let Some(path) = first_font_file(&context) else {
            return;
        };
        let registry = FontdbFaceRegistry::new(context.clone());

        let registered = registry
            .register_faces(&[FontFaceDeclaration::file("Declared Brand", path)])
            .await
            .unwrap();

        assert_eq!(registered, 1);
        assert!(context.read().unwrap().aliases.contains_key("Declared Brand"));
        let prober = FontdbProber::new(context);
        assert!(prober
            .measure(
                &FontStack::candidate("Declared Brand", GenericFamily::Serif),
                "abc",
                72.0
            )
            .is_ok());
    }

    fn first_font_file(context: &FontContext) -> Option<std::path::PathBuf> {
        let state = context.read().ok()?;
        state.db.faces().find_map(|info| match &info.source {
            fontdb::Source::File(path) => Some(path.clone()),
            _ => None,
        })
    }
}
