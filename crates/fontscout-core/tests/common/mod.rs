//! Shared fixtures for discovery integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use fontscout_core::testing::ScriptedProber;
use fontscout_core::{
    CacheStorePort, CandidateCatalog, DetectionSettings, DiscoveryDeps, DiscoveryOptions,
    FontDiscovery, FontEnumerationPort, NoopFaceRegistry, UnsupportedEnumerator,
};

pub const CLIENT_ID: &str = "scenario-client/1.0 (test; x86_64)";

pub const SCENARIO_CATALOG: [&str; 3] = ["Arial", "Zzzznotarealfont9000", "Courier New"];

/// Environment with Arial and Courier New installed.
pub fn scenario_prober() -> Arc<ScriptedProber> {
    Arc::new(ScriptedProber::with_installed(["Arial", "Courier New"]))
}

pub fn scenario_catalog() -> CandidateCatalog {
    CandidateCatalog::new(SCENARIO_CATALOG, Vec::new())
}

pub struct Harness {
    pub prober: Arc<ScriptedProber>,
    pub store: Arc<dyn CacheStorePort>,
    pub enumerator: Arc<dyn FontEnumerationPort>,
    pub catalog: CandidateCatalog,
    pub options: DiscoveryOptions,
}

impl Harness {
    pub fn new(store: Arc<dyn CacheStorePort>) -> Self {
        Self {
            prober: scenario_prober(),
            store,
            enumerator: Arc::new(UnsupportedEnumerator::new()),
            catalog: scenario_catalog(),
            options: DiscoveryOptions::default(),
        }
    }

    pub fn discovery(&self) -> FontDiscovery {
        let deps = DiscoveryDeps {
            prober: self.prober.clone(),
            enumerator: Arc::clone(&self.enumerator),
            registry: Arc::new(NoopFaceRegistry::new()),
            store: Arc::clone(&self.store),
            catalog: self.catalog.clone(),
            settings: DetectionSettings::default(),
            client_id: CLIENT_ID.to_string(),
        };
        FontDiscovery::new(deps, self.options).expect("default settings are valid")
    }
}
