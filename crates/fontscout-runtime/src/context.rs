//! Shared font database.
//!
//! Holds a `fontdb::Database` plus the alias families registered at runtime.
//! Generic families are mapped to the first well-known installed family.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use fontdb::{Database, FaceInfo, Family, ID, Query};
use thiserror::Error;
use tracing::{debug, warn};

use fontscout_core::GenericFamily;

/// Preferred families for each generic, most common first.
const MONOSPACE_FAMILIES: &[&str] = &[
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Noto Sans Mono",
    "Menlo",
    "Consolas",
    "Courier New",
    "Courier",
];
const SERIF_FAMILIES: &[&str] = &[
    "DejaVu Serif",
    "Liberation Serif",
    "Noto Serif",
    "Times New Roman",
    "Times",
    "Georgia",
];
const SANS_SERIF_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "Segoe UI",
];

/// Errors raised by the shared font state.
#[derive(Debug, Error)]
pub enum FontContextError {
    #[error("Font database lock poisoned")]
    Poisoned,
}

/// Family chosen for each generic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericAssignments {
    pub monospace: Option<String>,
    pub serif: Option<String>,
    pub sans_serif: Option<String>,
}

impl GenericAssignments {
    pub fn get(&self, generic: GenericFamily) -> Option<&str> {
        match generic {
            GenericFamily::Monospace => self.monospace.as_deref(),
            GenericFamily::Serif => self.serif.as_deref(),
            GenericFamily::SansSerif => self.sans_serif.as_deref(),
        }
    }
}

pub(crate) struct FontState {
    pub(crate) db: Database,
    /// Alias family name to the face it stands for.
    pub(crate) aliases: HashMap<String, ID>,
    pub(crate) generics: GenericAssignments,
}

impl FontState {
    /// Resolve one family of a stack to a face.
    pub(crate) fn resolve_named(&self, name: &str) -> Option<ID> {
        if let Some(id) = self.aliases.get(name) {
            return Some(*id);
        }
        self.db.query(&Query {
            families: &[Family::Name(name)],
            ..Query::default()
        })
    }

    pub(crate) fn resolve_generic(&self, generic: GenericFamily) -> Option<ID> {
        let family = match generic {
            GenericFamily::Monospace => Family::Monospace,
            GenericFamily::Serif => Family::Serif,
            GenericFamily::SansSerif => Family::SansSerif,
        };
        self.db.query(&Query {
            families: &[family],
            ..Query::default()
        })
    }

    fn has_family(&self, name: &str) -> bool {
        self.db
            .faces()
            .any(|face| face.families.iter().any(|(family, _)| family == name))
    }

    /// First preferred family that is installed, else a face of the right
    /// kind, else any face at all.
    ///
    /// A generic only stays unassigned when the database is empty.
    fn preferred_family(&self, preferred: &[&str], monospaced: bool) -> Option<String> {
        let first_family =
            |face: &FaceInfo| face.families.first().map(|(family, _)| family.clone());

        preferred
            .iter()
            .find(|name| self.has_family(name))
            .map(|name| (*name).to_string())
            .or_else(|| {
                self.db
                    .faces()
                    .filter(|face| face.monospaced == monospaced)
                    .find_map(first_family)
            })
            .or_else(|| self.db.faces().find_map(first_family))
    }

    /// Point each generic at the first preferred family that is installed.
    fn assign_generics(&mut self) {
        let generics = GenericAssignments {
            monospace: self.preferred_family(MONOSPACE_FAMILIES, true),
            serif: self.preferred_family(SERIF_FAMILIES, false),
            sans_serif: self.preferred_family(SANS_SERIF_FAMILIES, false),
        };

        if let Some(family) = &generics.monospace {
            self.db.set_monospace_family(family.clone());
        }
        if let Some(family) = &generics.serif {
            self.db.set_serif_family(family.clone());
        }
        if let Some(family) = &generics.sans_serif {
            self.db.set_sans_serif_family(family.clone());
        }

        debug!(?generics, "Assigned generic families");
        self.generics = generics;
    }
}

/// Cheaply cloneable handle to the shared font state.
#[derive(Clone)]
pub struct FontContext {
    inner: Arc<RwLock<FontState>>,
}

impl FontContext {
    /// A context with no fonts at all.
    pub fn empty() -> Self {
        Self::from_database(Database::new())
    }

    /// A context holding every font installed on the system.
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(), "Loaded system fonts");
        if db.is_empty() {
            warn!("No system fonts found");
        }
        Self::from_database(db)
    }

    /// Wrap an existing database and assign generics from its contents.
    pub fn from_database(db: Database) -> Self {
        let mut state = FontState {
            db,
            aliases: HashMap::new(),
            generics: GenericAssignments::default(),
        };
        state.assign_generics();
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Number of faces in the database.
    pub fn face_count(&self) -> usize {
        self.read().map(|state| state.db.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.face_count() == 0
    }

    /// Current generic assignments.
    pub fn generics(&self) -> GenericAssignments {
        self.read()
            .map(|state| state.generics.clone())
            .unwrap_or_default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, FontState>, FontContextError> {
        self.inner.read().map_err(|_| FontContextError::Poisoned)
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, FontState>, FontContextError> {
        self.inner.write().map_err(|_| FontContextError::Poisoned)
    }
}

impl std::fmt::Debug for FontContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontContext")
            .field("faces", &self.face_count())
            .field("generics", &self.generics())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn test_empty_context_has_no_generics() {
        let context = FontContext::empty();
        assert!(context.is_empty());
        assert_eq!(context.generics(), GenericAssignments::default());
    }

    /// System fonts with every monospaced face removed.
    pub(crate) fn database_without_monospace() -> Database {
        let mut db = Database::new();
        db.load_system_fonts();
        let monospaced: Vec<ID> = db
            .faces()
            .filter(|face| face.monospaced)
            .map(|face| face.id)
            .collect();
        for id in monospaced {
            db.remove_face(id);
        }
        db
    }

    #[test]
    fn test_generic_falls_back_to_any_face() {
        let db = database_without_monospace();
        if db.is_empty() {
            return;
        }

        let context = FontContext::from_database(db);
        let state = context.read().unwrap();
        let Some(family) = state.generics.monospace.clone() else {
            panic!("monospace left unassigned");
        };
        assert!(state.has_family(&family));
        assert!(state.resolve_generic(GenericFamily::Monospace).is_some());
    }

    #[test]
    fn test_system_generics_are_installed_families() {
        let context = FontContext::system();
        if context.is_empty() {
            return;
        }

        let state = context.read().unwrap();
        for generic in GenericFamily::ALL {
            if let Some(family) = state.generics.get(generic) {
                assert!(state.has_family(family), "{generic} -> {family}");
                assert!(state.resolve_generic(generic).is_some());
            }
        }
    }
}
