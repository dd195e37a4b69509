//! Catalog command handler.

use std::path::Path;

use anyhow::Result;

use fontscout_core::CandidateCatalog;

use crate::handlers::load_catalog;

/// Print the candidate names and the catalog fingerprint.
pub fn execute(catalog: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    println!("{}", render(&catalog));
    Ok(())
}

pub fn render(catalog: &CandidateCatalog) -> String {
    let mut out = catalog.names().join("\n");
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(&format!(
        "{} candidate(s), fingerprint {}",
        catalog.len(),
        catalog.fingerprint()
    ));
    out
}
