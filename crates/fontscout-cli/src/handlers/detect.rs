//! Detect command handler.

use anyhow::Result;
use serde_json::json;
use tracing::{info, warn};

use fontscout_core::{DiscoveryOptions, DiscoveryOutput, SettingsUpdate, validate_settings};

use crate::bootstrap::{CliContext, DiscoveryRequest};
use crate::commands::DetectArgs;
use crate::error::CliError;
use crate::handlers::load_catalog;

/// Run discovery and print the available fonts.
pub async fn execute(ctx: &CliContext, args: DetectArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?.with_faces(args.font_faces.clone());

    let mut settings = ctx.settings.clone();
    settings.merge(&SettingsUpdate {
        reference_size_px: args.size,
        threshold_px: args.threshold,
        ..Default::default()
    });
    validate_settings(&settings).map_err(|e| CliError::Arguments(e.to_string()))?;

    let options = DiscoveryOptions {
        use_cache: !args.no_cache,
        skip_privileged: args.heuristic_only,
    };

    let mut discovery = ctx.discovery(DiscoveryRequest {
        catalog,
        settings,
        options,
        permission: args.local_fonts.into(),
        client_id: args.client_id.clone(),
    })?;

    let output = discovery.run().await;
    for diagnostic in &output.diagnostics {
        warn!(%diagnostic, "Detection degraded");
    }
    info!(count = output.names.len(), method = %output.method, "Detection finished");

    println!("{}", render(&output, args.filter.as_deref(), args.json)?);
    Ok(())
}

/// Format the output for the terminal, applying the name filter.
pub fn render(output: &DiscoveryOutput, filter: Option<&str>, as_json: bool) -> Result<String> {
    let names = output.filtered(filter.unwrap_or_default());

    if as_json {
        let value = json!({ "names": names, "method": output.method });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut lines: Vec<String> = names.iter().map(|name| (*name).to_string()).collect();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "{} of {} font(s) via {}",
        names.len(),
        output.names.len(),
        output.method
    ));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontscout_core::DiscoveryMethod;

    fn output() -> DiscoveryOutput {
        DiscoveryOutput {
            names: vec!["Arial".to_string(), "Courier New".to_string()],
            method: DiscoveryMethod::Heuristic,
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_render_text() {
        let text = render(&output(), None, false).unwrap();
        assert_eq!(text, "Arial\nCourier New\n\n2 of 2 font(s) via heuristic");
    }

    #[test]
    fn test_render_filtered_json() {
        let text = render(&output(), Some("COURIER"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["names"], json!(["Courier New"]));
        assert_eq!(value["method"], "heuristic");
    }

    #[test]
    fn test_render_empty() {
        let empty = DiscoveryOutput {
            names: Vec::new(),
            method: DiscoveryMethod::Api,
            diagnostics: Vec::new(),
        };
        assert_eq!(render(&empty, None, false).unwrap(), "0 of 0 font(s) via api");
    }
}
