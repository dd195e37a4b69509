//! Path utilities for fontscout data directories.
//!
//! Resolution order for the data root:
//! 1. Explicit override (e.g. `--data-dir`)
//! 2. `FONTSCOUT_DATA_DIR` environment variable
//! 3. System data directory (e.g. `~/.local/share/fontscout`)
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - Resolution is pure; directory creation is a separate, explicit step

mod error;

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub use error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "FONTSCOUT_DATA_DIR";

/// File name of the cache database inside the data root.
pub const CACHE_DB_FILE: &str = "cache.db";

/// Where the data root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRootSource {
    Override,
    Environment,
    System,
}

/// All resolved paths captured in a single struct.
///
/// Used by the CLI `paths` command and by the composition root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root directory for application data.
    pub data_root: PathBuf,
    /// How the data root was resolved.
    pub source: DataRootSource,
    /// Path to the cache database file.
    pub cache_db_path: PathBuf,
}

impl ResolvedPaths {
    /// Resolve using the current environment.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, PathError> {
        let env_value = env::var(DATA_DIR_ENV).ok();
        Self::resolve_from(override_dir, env_value.as_deref(), dirs::data_local_dir())
    }

    /// Pure resolver: every input is explicit.
    pub fn resolve_from(
        override_dir: Option<&Path>,
        env_value: Option<&str>,
        system_data_dir: Option<PathBuf>,
    ) -> Result<Self, PathError> {
        let (data_root, source) = if let Some(dir) = override_dir {
            if dir.as_os_str().is_empty() {
                return Err(PathError::EmptyPath);
            }
            (dir.to_path_buf(), DataRootSource::Override)
        } else if let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
            (PathBuf::from(value), DataRootSource::Environment)
        } else {
            let system = system_data_dir.ok_or(PathError::NoDataDir)?;
            (system.join("fontscout"), DataRootSource::System)
        };

        Ok(Self {
            cache_db_path: data_root.join(CACHE_DB_FILE),
            data_root,
            source,
        })
    }

    /// Create the data root if it does not exist yet.
    pub fn ensure_data_root(&self) -> Result<(), PathError> {
        if self.data_root.exists() {
            if !self.data_root.is_dir() {
                return Err(PathError::NotADirectory(self.data_root.clone()));
            }
            return Ok(());
        }

        fs::create_dir_all(&self.data_root).map_err(|e| PathError::CreateFailed {
            path: self.data_root.clone(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            DataRootSource::Override => "--data-dir",
            DataRootSource::Environment => DATA_DIR_ENV,
            DataRootSource::System => "system default",
        };
        writeln!(f, "Data root:      {} ({source})", self.data_root.display())?;
        write!(f, "Cache database: {}", self.cache_db_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let paths = ResolvedPaths::resolve_from(
            Some(Path::new("/tmp/override")),
            Some("/tmp/env"),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(paths.data_root, PathBuf::from("/tmp/override"));
        assert_eq!(paths.source, DataRootSource::Override);
        assert_eq!(paths.cache_db_path, PathBuf::from("/tmp/override/cache.db"));
    }

    #[test]
    fn test_env_before_system() {
        let paths = ResolvedPaths::resolve_from(
            None,
            Some("/tmp/env"),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(paths.source, DataRootSource::Environment);
    }

    #[test]
    fn test_blank_env_falls_back_to_system() {
        let paths =
            ResolvedPaths::resolve_from(None, Some("  "), Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(paths.data_root, PathBuf::from("/data/fontscout"));
        assert_eq!(paths.source, DataRootSource::System);
    }

    #[test]
    fn test_no_system_dir_is_an_error() {
        assert!(matches!(
            ResolvedPaths::resolve_from(None, None, None),
            Err(PathError::NoDataDir)
        ));
    }
}
