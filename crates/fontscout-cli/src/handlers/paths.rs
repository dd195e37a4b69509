//! Paths command handler.
//!
//! Displays resolved paths for diagnostics. Does not create anything.

use std::path::Path;

use anyhow::Result;

use fontscout_core::paths::ResolvedPaths;

use crate::error::CliError;

/// Resolve and print the data root and cache database location.
pub fn execute(data_dir: Option<&Path>) -> Result<()> {
    let paths = ResolvedPaths::resolve(data_dir).map_err(CliError::from)?;
    println!("{paths}");
    Ok(())
}
