//! Discovery orchestrator.
//!
//! Tries the privileged enumeration collaborator first and falls back to the
//! heuristic pipeline (catalog, cache lookup, detection, cache store). No
//! failure on either path escapes; degraded steps become [`Diagnostic`]s.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    DetectionResult, Diagnostic, DiscoveryMethod, DiscoveryOutput, Unavailability,
    build_local_aliases, display_names,
};
use crate::ports::{
    CacheStorePort, CoreError, EnumerationError, FontEnumerationPort, FontFaceRegistryPort,
    MetricProberPort, PermissionState,
};
use crate::settings::{DetectionSettings, validate_settings};

use super::cache::{CacheLookup, ResultCache};
use super::catalog::CandidateCatalog;
use super::session::DetectionSession;

/// Orchestrator states, in the order a run visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryState {
    Init,
    TryPrivilegedEnumeration,
    RunHeuristic,
    CacheHit,
    CacheMiss,
    Detecting,
    Done(DiscoveryMethod),
}

impl fmt::Display for DiscoveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("init"),
            Self::TryPrivilegedEnumeration => f.write_str("try-privileged-enumeration"),
            Self::RunHeuristic => f.write_str("run-heuristic"),
            Self::CacheHit => f.write_str("cache-hit"),
            Self::CacheMiss => f.write_str("cache-miss"),
            Self::Detecting => f.write_str("detecting"),
            Self::Done(method) => write!(f, "done({method})"),
        }
    }
}

/// Per-run switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Read and write the result cache.
    pub use_cache: bool,
    /// Go straight to the heuristic path.
    pub skip_privileged: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            skip_privileged: false,
        }
    }
}

/// Everything the orchestrator needs, injected by the composition root.
pub struct DiscoveryDeps {
    /// Port for measuring probe strings.
    pub prober: Arc<dyn MetricProberPort>,
    /// Port for privileged local font enumeration.
    pub enumerator: Arc<dyn FontEnumerationPort>,
    /// Port for registering declared faces and local aliases.
    pub registry: Arc<dyn FontFaceRegistryPort>,
    /// Persistent store behind the result cache.
    pub store: Arc<dyn CacheStorePort>,
    pub catalog: CandidateCatalog,
    pub settings: DetectionSettings,
    /// Environment identity scoping cached results.
    pub client_id: String,
}

/// Drives one discovery session.
///
/// Runs take `&mut self`, so one instance never runs two scans at once.
pub struct FontDiscovery {
    enumerator: Arc<dyn FontEnumerationPort>,
    registry: Arc<dyn FontFaceRegistryPort>,
    cache: ResultCache,
    catalog: CandidateCatalog,
    settings: DetectionSettings,
    client_id: String,
    options: DiscoveryOptions,
    session: DetectionSession,
    state: DiscoveryState,
    phases: Vec<DiscoveryState>,
    output: Option<DiscoveryOutput>,
}

impl FontDiscovery {
    /// Build an orchestrator. Fails only on invalid settings.
    pub fn new(deps: DiscoveryDeps, options: DiscoveryOptions) -> Result<Self, CoreError> {
        validate_settings(&deps.settings)?;
        let probes = deps.settings.probe_set()?;

        let session = DetectionSession::new(
            deps.prober,
            probes,
            deps.settings.reference_size_px,
            deps.settings.threshold_px,
        );
        let cache = ResultCache::with_policy(
            deps.store,
            deps.settings.cache_namespace.clone(),
            deps.settings.cache_ttl_ms,
        );

        Ok(Self {
            enumerator: deps.enumerator,
            registry: deps.registry,
            cache,
            catalog: deps.catalog,
            settings: deps.settings,
            client_id: deps.client_id,
            options,
            session,
            state: DiscoveryState::Init,
            phases: vec![DiscoveryState::Init],
            output: None,
        })
    }

    pub const fn state(&self) -> DiscoveryState {
        self.state
    }

    /// States visited by the last run, starting with `Init`.
    pub fn phases(&self) -> &[DiscoveryState] {
        &self.phases
    }

    /// Output of the last completed run.
    pub const fn output(&self) -> Option<&DiscoveryOutput> {
        self.output.as_ref()
    }

    pub const fn catalog(&self) -> &CandidateCatalog {
        &self.catalog
    }

    pub const fn session(&self) -> &DetectionSession {
        &self.session
    }

    pub const fn options(&self) -> DiscoveryOptions {
        self.options
    }

    pub const fn set_options(&mut self, options: DiscoveryOptions) {
        self.options = options;
    }

    /// Run discovery: privileged path first unless disabled, then heuristics.
    pub async fn run(&mut self) -> DiscoveryOutput {
        self.begin();
        let mut diagnostics = Vec::new();

        if self.options.skip_privileged {
            debug!("Privileged enumeration skipped");
        } else {
            self.enter(DiscoveryState::TryPrivilegedEnumeration);
            match self.try_privileged(&mut diagnostics).await {
                Ok(names) => return self.finish(names, DiscoveryMethod::Api, diagnostics),
                Err(reason) => {
                    info!(%reason, "Falling back to heuristic detection");
                    diagnostics.push(Diagnostic::PrivilegedUnavailable(reason));
                }
            }
        }

        self.heuristic(diagnostics).await
    }

    /// Run the heuristic pipeline only.
    pub async fn run_heuristic(&mut self) -> DiscoveryOutput {
        self.begin();
        self.heuristic(Vec::new()).await
    }

    /// React to a permission change notification from the host.
    ///
    /// Only a transition to `Granted` triggers a new run.
    pub async fn on_permission_change(
        &mut self,
        state: PermissionState,
    ) -> Option<DiscoveryOutput> {
        if state == PermissionState::Granted {
            info!("Local font permission granted, rerunning discovery");
            Some(self.run().await)
        } else {
            debug!(?state, "Permission change ignored");
            None
        }
    }

    fn begin(&mut self) {
        self.phases.clear();
        self.state = DiscoveryState::Init;
        self.phases.push(DiscoveryState::Init);
    }

    fn enter(&mut self, state: DiscoveryState) {
        debug!(from = %self.state, to = %state, "Discovery transition");
        self.state = state;
        self.phases.push(state);
    }

    fn finish(
        &mut self,
        names: Vec<String>,
        method: DiscoveryMethod,
        diagnostics: Vec<Diagnostic>,
    ) -> DiscoveryOutput {
        self.enter(DiscoveryState::Done(method));
        info!(
            count = names.len(),
            %method,
            degraded = diagnostics.len(),
            "Font discovery finished"
        );
        let output = DiscoveryOutput::new(names, method, diagnostics);
        self.output = Some(output.clone());
        output
    }

    async fn try_privileged(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<String>, Unavailability> {
        match self.enumerator.permission_state().await {
            PermissionState::Denied => return Err(Unavailability::PermissionDenied),
            PermissionState::Unsupported => return Err(Unavailability::Unsupported),
            PermissionState::Granted | PermissionState::Prompt => {}
        }

        let entries = self
            .enumerator
            .query_local_fonts()
            .await
            .map_err(|e| match e {
                EnumerationError::PermissionDenied(_) => Unavailability::PermissionDenied,
                EnumerationError::NotSupported => Unavailability::Unsupported,
                EnumerationError::Backend(reason) => Unavailability::QueryFailed(reason),
            })?;

        let names = display_names(&entries);
        if names.is_empty() {
            return Err(Unavailability::Empty);
        }

        let aliases = build_local_aliases(&entries);
        if !aliases.is_empty() {
            match self.registry.register_local_aliases(&aliases).await {
                Ok(registered) => {
                    debug!(registered, total = aliases.len(), "Registered local aliases");
                }
                Err(e) => {
                    warn!(error = %e, "Local alias registration failed");
                    diagnostics.push(Diagnostic::AliasRegistrationFailed(e.to_string()));
                }
            }
        }

        Ok(names)
    }

    async fn heuristic(&mut self, mut diagnostics: Vec<Diagnostic>) -> DiscoveryOutput {
        self.enter(DiscoveryState::RunHeuristic);
        let fingerprint = self.catalog.fingerprint();

        if self.options.use_cache {
            match self.cache.load(&fingerprint, &self.client_id).await {
                CacheLookup::Hit(result) if !result.is_empty() => {
                    self.enter(DiscoveryState::CacheHit);
                    let names = result.into_names();
                    return self.finish(names, DiscoveryMethod::Heuristic, diagnostics);
                }
                CacheLookup::Hit(_) => {
                    debug!("Cached result is empty, detecting again");
                    self.enter(DiscoveryState::CacheMiss);
                }
                CacheLookup::Miss(miss) => {
                    debug!(%miss, "Cache miss");
                    self.enter(DiscoveryState::CacheMiss);
                    diagnostics.push(Diagnostic::CacheMiss(miss));
                }
            }
        }

        self.enter(DiscoveryState::Detecting);
        self.register_declared_faces(&mut diagnostics).await;

        let report = self
            .session
            .scan(self.catalog.names().iter().map(String::as_str));
        let failures = report.failed_probes + report.baseline_failures;
        if failures > 0 {
            diagnostics.push(Diagnostic::ProbeFailures { count: failures });
        }

        if self.options.use_cache {
            self.store_result(&fingerprint, &report.result, &mut diagnostics)
                .await;
        }

        self.finish(
            report.result.into_names(),
            DiscoveryMethod::Heuristic,
            diagnostics,
        )
    }

    /// Register the catalog's declared faces once per session, then wait
    /// for the environment to apply them.
    async fn register_declared_faces(&mut self, diagnostics: &mut Vec<Diagnostic>) {
        if self.session.faces_registered() {
            return;
        }
        self.session.mark_faces_registered();

        let faces = self.catalog.faces();
        if faces.is_empty() {
            return;
        }

        match self.registry.register_faces(faces).await {
            Ok(registered) if registered == faces.len() => {
                debug!(registered, "Registered declared faces");
            }
            Ok(registered) => {
                warn!(registered, total = faces.len(), "Some declared faces failed to register");
                diagnostics.push(Diagnostic::FaceRegistrationFailed(format!(
                    "{registered} of {} faces registered",
                    faces.len()
                )));
            }
            Err(e) => {
                warn!(error = %e, "Declared face registration failed");
                diagnostics.push(Diagnostic::FaceRegistrationFailed(e.to_string()));
            }
        }

        tokio::time::sleep(self.settings.settle_delay()).await;
    }

    async fn store_result(
        &self,
        fingerprint: &str,
        result: &DetectionResult,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if let Err(e) = self.cache.save(fingerprint, &self.client_id, result).await {
            warn!(error = %e, "Failed to cache detection result");
            diagnostics.push(Diagnostic::CacheSaveFailed(e.to_string()));
        }
    }
}
