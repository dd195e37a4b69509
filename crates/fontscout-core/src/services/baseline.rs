//! Per-generic reference measurements.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::{FontStack, GenericFamily, Measurement, ProbeSet};
use crate::ports::MetricProberPort;

/// Reference measurements of every probe rendered in each generic family alone.
///
/// A table is only meaningful for the probe set and reference size it was
/// built with; see [`BaselineTable::is_stale_for`].
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTable {
    probes: ProbeSet,
    size_px: f32,
    rows: BTreeMap<GenericFamily, Vec<Option<Measurement>>>,
    failures: usize,
}

impl BaselineTable {
    /// Measure each probe in each generic, generics in detection order and
    /// probes in probe order.
    ///
    /// A failed measurement leaves a `None` slot; nothing compared against it
    /// counts as divergence.
    pub fn build(prober: &dyn MetricProberPort, probes: &ProbeSet, size_px: f32) -> Self {
        let mut rows = BTreeMap::new();
        let mut failures = 0;

        for generic in GenericFamily::ALL {
            let stack = FontStack::generic(generic);
            let row: Vec<Option<Measurement>> = probes
                .iter()
                .map(|probe| match prober.measure(&stack, probe, size_px) {
                    Ok(measurement) => Some(measurement),
                    Err(e) => {
                        warn!(%generic, error = %e, "Baseline measurement failed");
                        failures += 1;
                        None
                    }
                })
                .collect();
            rows.insert(generic, row);
        }

        debug!(
            probes = probes.len(),
            size_px,
            failures,
            "Built baseline table"
        );

        Self {
            probes: probes.clone(),
            size_px,
            rows,
            failures,
        }
    }

    /// Baseline measurement of probe `index` in `generic`.
    pub fn get(&self, generic: GenericFamily, index: usize) -> Option<&Measurement> {
        self.rows
            .get(&generic)
            .and_then(|row| row.get(index))
            .and_then(Option::as_ref)
    }

    /// All slots for `generic`, in probe order.
    pub fn row(&self, generic: GenericFamily) -> &[Option<Measurement>] {
        self.rows.get(&generic).map_or(&[], Vec::as_slice)
    }

    pub const fn probes(&self) -> &ProbeSet {
        &self.probes
    }

    pub const fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Number of slots whose measurement failed.
    pub const fn failures(&self) -> usize {
        self.failures
    }

    /// Whether the table was built for a different probe set or size.
    #[allow(clippy::float_cmp)]
    pub fn is_stale_for(&self, probes: &ProbeSet, size_px: f32) -> bool {
        self.probes != *probes || self.size_px != size_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProber;

    #[test]
    fn test_build_measures_every_generic_and_probe() {
        let prober = ScriptedProber::new();
        let probes = ProbeSet::default();
        let table = BaselineTable::build(&prober, &probes, 72.0);

        assert_eq!(prober.call_count(), 9);
        for generic in GenericFamily::ALL {
            assert_eq!(table.row(generic).len(), 3);
            assert!(table.row(generic).iter().all(Option::is_some));
        }
        assert_eq!(table.failures(), 0);
    }

    #[test]
    fn test_generics_have_distinct_rows() {
        let prober = ScriptedProber::new();
        let table = BaselineTable::build(&prober, &ProbeSet::default(), 72.0);
        assert_ne!(
            table.get(GenericFamily::Serif, 0),
            table.get(GenericFamily::Monospace, 0)
        );
    }

    #[test]
    fn test_failed_generic_leaves_empty_slots() {
        let prober = ScriptedProber::new().fail_generic(GenericFamily::Serif);
        let table = BaselineTable::build(&prober, &ProbeSet::default(), 72.0);

        assert!(table.get(GenericFamily::Serif, 0).is_none());
        assert!(table.get(GenericFamily::Monospace, 0).is_some());
        assert_eq!(table.failures(), 3);
    }

    #[test]
    fn test_staleness() {
        let prober = ScriptedProber::new();
        let probes = ProbeSet::default();
        let table = BaselineTable::build(&prober, &probes, 72.0);

        assert!(!table.is_stale_for(&probes, 72.0));
        assert!(table.is_stale_for(&probes, 48.0));
        let other = ProbeSet::new(["xyz"]).unwrap();
        assert!(table.is_stale_for(&other, 72.0));
    }
}
