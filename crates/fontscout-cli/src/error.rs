//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` and friends to exit codes and user-facing messages.

use fontscout_core::{CacheError, CoreError, PathError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error (anything that is not a `CliError`)
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Settings(settings_err) => Self::Config(settings_err.to_string()),
        }
    }
}

impl From<CacheError> for CliError {
    fn from(err: CacheError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Exit code for any error reaching `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontscout_core::{RepositoryError, SettingsError};

    #[test]
    fn test_errors_map_to_exit_codes() {
        let config: CliError = CoreError::Settings(SettingsError::EmptyProbeSet).into();
        assert_eq!(config.exit_code(), 78);

        let db: CliError = CacheError::Store(RepositoryError::Storage("x".into())).into();
        assert_eq!(db.exit_code(), 73);

        let path: CliError = PathError::NoDataDir.into();
        assert_eq!(path.exit_code(), 78);

        assert_eq!(CliError::Arguments("bad".into()).exit_code(), 2);
    }

    #[test]
    fn test_anyhow_downcast() {
        let err = anyhow::Error::new(CliError::Io("gone".into()));
        assert_eq!(exit_code_for(&err), 74);
        assert_eq!(exit_code_for(&anyhow::anyhow!("plain")), 1);
    }
}
