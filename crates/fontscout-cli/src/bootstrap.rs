//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Cache store (via fontscout-db)
//! - Font database, prober, enumerator and face registry (via fontscout-runtime)
//! - The discovery orchestrator (via fontscout-core)

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use fontscout_core::paths::ResolvedPaths;
use fontscout_core::{
    CacheStorePort, CandidateCatalog, DetectionSettings, DiscoveryDeps, DiscoveryOptions,
    FontDiscovery, PermissionState, ResultCache, validate_settings,
};
use fontscout_db::setup_cache_store;
use fontscout_runtime::{
    FontContext, FontdbFaceRegistry, FontdbProber, SystemFontEnumerator, client_identity,
};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Data directory override (`--data-dir`).
    pub data_dir: Option<PathBuf>,
    /// Detection settings file (`--settings`).
    pub settings_file: Option<PathBuf>,
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    pub paths: ResolvedPaths,
    pub settings: DetectionSettings,
    /// Persistent store behind the result cache.
    pub store: Arc<dyn CacheStorePort>,
}

/// Everything a detection run needs beyond the context.
pub struct DiscoveryRequest {
    pub catalog: CandidateCatalog,
    pub settings: DetectionSettings,
    pub options: DiscoveryOptions,
    pub permission: PermissionState,
    pub client_id: Option<String>,
}

impl CliContext {
    /// The result cache configured from the current settings.
    pub fn result_cache(&self) -> ResultCache {
        ResultCache::with_policy(
            Arc::clone(&self.store),
            self.settings.cache_namespace.clone(),
            self.settings.cache_ttl_ms,
        )
    }

    /// Build an orchestrator over the system font database.
    pub fn discovery(&self, request: DiscoveryRequest) -> Result<FontDiscovery, CliError> {
        let fonts = FontContext::system();
        debug!(?fonts, "Font database ready");
        self.discovery_with(fonts, request)
    }

    /// Build an orchestrator over an explicit font database.
    pub fn discovery_with(
        &self,
        fonts: FontContext,
        request: DiscoveryRequest,
    ) -> Result<FontDiscovery, CliError> {
        let deps = DiscoveryDeps {
            prober: Arc::new(FontdbProber::new(fonts.clone())),
            enumerator: Arc::new(SystemFontEnumerator::new(fonts.clone(), request.permission)),
            registry: Arc::new(FontdbFaceRegistry::new(fonts)),
            store: Arc::clone(&self.store),
            catalog: request.catalog,
            settings: request.settings,
            client_id: request.client_id.unwrap_or_else(client_identity),
        };
        Ok(FontDiscovery::new(deps, request.options)?)
    }
}

/// Load settings from a JSON file, or defaults when none is given.
pub fn load_settings(path: Option<&Path>) -> Result<DetectionSettings, CliError> {
    let Some(path) = path else {
        return Ok(DetectionSettings::default());
    };

    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    let settings: DetectionSettings = serde_json::from_str(&raw)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
    validate_settings(&settings).map_err(|e| CliError::Config(e.to_string()))?;
    Ok(settings)
}

/// Compose the CLI context: paths, settings and cache store.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let paths = ResolvedPaths::resolve(config.data_dir.as_deref()).map_err(CliError::from)?;
    paths.ensure_data_root().map_err(CliError::from)?;

    let settings = load_settings(config.settings_file.as_deref())?;

    let store = setup_cache_store(&paths.cache_db_path)
        .await
        .map_err(|e| CliError::Database(format!("{e:#}")))
        .with_context(|| format!("opening {}", paths.cache_db_path.display()))?;

    Ok(CliContext {
        paths,
        settings,
        store: Arc::new(store),
    })
}
