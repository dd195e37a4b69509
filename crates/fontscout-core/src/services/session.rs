//! Per-session detection state: the baseline and the face registration flag.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{DetectionResult, ProbeSet};
use crate::ports::MetricProberPort;

use super::baseline::BaselineTable;
use super::detector::PresenceDetector;

/// Result of scanning a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanReport {
    pub result: DetectionResult,
    /// Candidate measurements that failed during the scan.
    pub failed_probes: usize,
    /// Baseline slots that could not be measured.
    pub baseline_failures: usize,
}

/// Owns the state one detection session reuses across scans.
///
/// The baseline is built lazily on first use and rebuilt only when the
/// probe set or reference size changes.
pub struct DetectionSession {
    prober: Arc<dyn MetricProberPort>,
    probes: ProbeSet,
    size_px: f32,
    threshold_px: f32,
    baseline: Option<BaselineTable>,
    baseline_builds: usize,
    faces_registered: bool,
}

impl DetectionSession {
    pub fn new(
        prober: Arc<dyn MetricProberPort>,
        probes: ProbeSet,
        size_px: f32,
        threshold_px: f32,
    ) -> Self {
        Self {
            prober,
            probes,
            size_px,
            threshold_px,
            baseline: None,
            baseline_builds: 0,
            faces_registered: false,
        }
    }

    /// Change the measurement parameters. The baseline is rebuilt on next use
    /// if it no longer matches.
    pub fn reconfigure(&mut self, probes: ProbeSet, size_px: f32, threshold_px: f32) {
        self.probes = probes;
        self.size_px = size_px;
        self.threshold_px = threshold_px;
    }

    /// The current baseline, building it first if needed.
    pub fn baseline(&mut self) -> &BaselineTable {
        let table = match self.baseline.take() {
            Some(table) if !table.is_stale_for(&self.probes, self.size_px) => table,
            previous => {
                debug!(rebuild = previous.is_some(), "Building baseline");
                self.baseline_builds += 1;
                BaselineTable::build(self.prober.as_ref(), &self.probes, self.size_px)
            }
        };
        self.baseline.insert(table)
    }

    /// How many times a baseline has been built in this session.
    pub const fn baseline_builds(&self) -> usize {
        self.baseline_builds
    }

    pub const fn faces_registered(&self) -> bool {
        self.faces_registered
    }

    pub const fn mark_faces_registered(&mut self) {
        self.faces_registered = true;
    }

    /// Run the presence detector over `names`.
    pub fn scan<'n, I>(&mut self, names: I) -> ScanReport
    where
        I: IntoIterator<Item = &'n str>,
    {
        let prober = Arc::clone(&self.prober);
        let threshold_px = self.threshold_px;
        let baseline = self.baseline();
        let baseline_failures = baseline.failures();
        let detector = PresenceDetector::new(prober.as_ref(), threshold_px);

        let mut present = Vec::new();
        let mut failed_probes = 0;
        let mut scanned = 0usize;
        for name in names {
            scanned += 1;
            let evaluation = detector.evaluate(name, baseline);
            failed_probes += evaluation.failed_probes;
            if evaluation.present {
                present.push(name);
            }
        }

        let result = DetectionResult::from_names(present);
        info!(
            scanned,
            present = result.len(),
            failed_probes,
            "Heuristic scan finished"
        );

        ScanReport {
            result,
            failed_probes,
            baseline_failures,
        }
    }
}
