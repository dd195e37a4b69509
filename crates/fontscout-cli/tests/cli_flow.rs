//! End-to-end flows through the CLI's public API, without system fonts.

use clap::Parser;
use fontscout_cli::{Cli, CliConfig, Commands, DiscoveryRequest, bootstrap, handlers};
use fontscout_core::{
    CacheLookup, CandidateCatalog, DiscoveryMethod, DiscoveryOptions, PermissionState,
};
use fontscout_runtime::FontContext;

fn config_for(args: &[&str]) -> (Cli, CliConfig) {
    let cli = Cli::parse_from(args);
    let config = CliConfig {
        data_dir: cli.data_dir.clone(),
        settings_file: cli.settings.clone(),
    };
    (cli, config)
}

#[tokio::test]
async fn detect_then_clear_cache() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_str().unwrap();
    let (cli, config) = config_for(&["fontscout", "--data-dir", data_dir, "detect", "--json"]);
    assert!(matches!(cli.command, Some(Commands::Detect(_))));

    let ctx = bootstrap(config).await.unwrap();
    let catalog = CandidateCatalog::new(["Zzzznotarealfont9000"], Vec::new());
    let fingerprint = catalog.fingerprint();

    let mut discovery = ctx
        .discovery_with(
            FontContext::empty(),
            DiscoveryRequest {
                catalog,
                settings: ctx.settings.clone(),
                options: DiscoveryOptions::default(),
                permission: PermissionState::Denied,
                client_id: Some("flow-test".to_string()),
            },
        )
        .unwrap();

    let output = discovery.run().await;
    assert_eq!(output.method, DiscoveryMethod::Heuristic);
    assert!(output.names.is_empty());

    // An empty result was still written
    let cache = ctx.result_cache();
    assert!(matches!(
        cache.load(&fingerprint, "flow-test").await,
        CacheLookup::Hit(_)
    ));

    handlers::cache::execute(&ctx, fontscout_cli::CacheCommand::Clear)
        .await
        .unwrap();
    assert!(matches!(
        cache.load(&fingerprint, "flow-test").await,
        CacheLookup::Miss(_)
    ));
}

#[tokio::test]
async fn settings_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    std::fs::write(&settings_path, r#"{ "cache_namespace": "fontDetectCache_v2" }"#).unwrap();

    let (_, config) = config_for(&[
        "fontscout",
        "--data-dir",
        dir.path().to_str().unwrap(),
        "--settings",
        settings_path.to_str().unwrap(),
        "cache",
        "clear",
    ]);
    let ctx = bootstrap(config).await.unwrap();
    assert_eq!(ctx.settings.cache_namespace, "fontDetectCache_v2");
    assert_eq!(
        ctx.result_cache().key("abc", "client"),
        "fontDetectCache_v2:abc:client"
    );
}
