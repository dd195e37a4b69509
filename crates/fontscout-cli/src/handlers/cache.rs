//! Cache command handlers.

use anyhow::Result;
use tracing::info;

use crate::bootstrap::CliContext;
use crate::commands::CacheCommand;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, command: CacheCommand) -> Result<()> {
    match command {
        CacheCommand::Clear => clear(ctx).await,
    }
}

/// Remove every cached result in the configured namespace.
async fn clear(ctx: &CliContext) -> Result<()> {
    let removed = ctx.result_cache().clear().await.map_err(CliError::from)?;
    info!(removed, namespace = %ctx.settings.cache_namespace, "Cache cleared");
    println!("Removed {removed} cached result(s)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use fontscout_core::{CacheLookup, DetectionResult};

    #[tokio::test]
    async fn test_clear_removes_saved_results() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = bootstrap(CliConfig {
            data_dir: Some(dir.path().to_path_buf()),
            settings_file: None,
        })
        .await
        .unwrap();

        let cache = ctx.result_cache();
        let result = DetectionResult::from_names(["Arial"]);
        cache.save("abc", "client", &result).await.unwrap();

        execute(&ctx, CacheCommand::Clear).await.unwrap();
        assert!(matches!(
            cache.load("abc", "client").await,
            CacheLookup::Miss(_)
        ));
    }
}
