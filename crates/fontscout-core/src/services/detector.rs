//! Heuristic presence detection.
//!
//! A candidate is present when text rendered in `'<name>', <generic>`
//! measurably differs from the generic alone, for every generic family.
//! If the environment silently falls back for the candidate, the stack
//! measures exactly like one of the baselines and the candidate is absent.

use tracing::trace;

use crate::domain::{FontStack, GenericFamily};
use crate::ports::MetricProberPort;

use super::baseline::BaselineTable;

/// Outcome of evaluating one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub present: bool,
    /// Measurements that failed and were treated as non-matches.
    pub failed_probes: usize,
}

/// Compares candidate stacks against a baseline table.
pub struct PresenceDetector<'a> {
    prober: &'a dyn MetricProberPort,
    threshold_px: f32,
}

impl<'a> PresenceDetector<'a> {
    pub fn new(prober: &'a dyn MetricProberPort, threshold_px: f32) -> Self {
        Self {
            prober,
            threshold_px,
        }
    }

    /// Whether `name` is judged present.
    pub fn is_present(&self, name: &str, baseline: &BaselineTable) -> bool {
        self.evaluate(name, baseline).present
    }

    /// Evaluate `name` against every generic in detection order.
    ///
    /// Within a generic the first divergent probe is enough. A generic with
    /// no divergent probe ends the evaluation as absent.
    pub fn evaluate(&self, name: &str, baseline: &BaselineTable) -> Evaluation {
        let mut failed_probes = 0;

        for generic in GenericFamily::ALL {
            let (diverged, failures) = self.diverges_from(name, generic, baseline);
            failed_probes += failures;
            if !diverged {
                trace!(name, %generic, "No divergence, candidate absent");
                return Evaluation {
                    present: false,
                    failed_probes,
                };
            }
        }

        Evaluation {
            present: true,
            failed_probes,
        }
    }

    fn diverges_from(
        &self,
        name: &str,
        generic: GenericFamily,
        baseline: &BaselineTable,
    ) -> (bool, usize) {
        let stack = FontStack::candidate(name, generic);
        let mut failures = 0;

        for (index, probe) in baseline.probes().iter().enumerate() {
            let measured = match self.prober.measure(&stack, probe, baseline.size_px()) {
                Ok(measured) => measured,
                Err(e) => {
                    trace!(name, %generic, error = %e, "Probe failed");
                    failures += 1;
                    continue;
                }
            };

            let Some(reference) = baseline.get(generic, index) else {
                continue;
            };

            if measured.differs_from(reference, self.threshold_px) {
                return (true, failures);
            }
        }

        (false, failures)
    }
}
