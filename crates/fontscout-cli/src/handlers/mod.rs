//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call core services
//!   3. Format output for the terminal
//!
//! Handlers should NOT open databases or build font adapters themselves;
//! that is the job of `bootstrap`.

pub mod cache;
pub mod catalog;
pub mod detect;
pub mod paths;

use std::fs;
use std::path::Path;

use fontscout_core::CandidateCatalog;

use crate::error::CliError;

/// The built-in catalog, or one read from a file.
pub fn load_catalog(path: Option<&Path>) -> Result<CandidateCatalog, CliError> {
    match path {
        None => Ok(CandidateCatalog::builtin()),
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            let catalog = CandidateCatalog::from_text(&text);
            if catalog.is_empty() {
                return Err(CliError::Arguments(format!(
                    "{} contains no font names",
                    path.display()
                )));
            }
            Ok(catalog)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fonts.txt");
        fs::write(&path, "# comment\nArial\n\nMenlo\nArial\n").unwrap();

        let catalog = load_catalog(Some(&path)).unwrap();
        assert_eq!(catalog.names(), ["Arial", "Menlo"]);
        assert_eq!(catalog.fingerprint(), "4bce81d4bafde493");
    }

    #[test]
    fn test_load_catalog_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fonts.txt");
        fs::write(&path, "# nothing\n").unwrap();

        let err = load_catalog(Some(&path)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/fonts.txt"))).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_builtin_catalog_by_default() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog, CandidateCatalog::builtin());
    }
}
