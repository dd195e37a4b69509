//! Scripted adapters for tests and offline runs.
//!
//! `ScriptedProber` simulates a rendering environment: each generic family
//! has its own metrics, and every "installed" font renders with metrics that
//! differ from all of them unless configured otherwise.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{FontFamily, FontStack, GenericFamily, Measurement};
use crate::ports::{MetricProberPort, ProbeError, ProbeResult};

/// A metric prober driven by a fixed script of installed fonts.
#[derive(Debug, Default)]
pub struct ScriptedProber {
    /// Installed fonts and the generics they diverge from.
    installed: HashMap<String, Vec<GenericFamily>>,
    failing_fonts: HashSet<String>,
    failing_generics: HashSet<GenericFamily>,
    calls: AtomicUsize,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prober where each of `names` is installed.
    pub fn with_installed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(Self::new(), |prober, name| prober.install(name))
    }

    /// Install a font that renders differently from every generic.
    #[must_use]
    pub fn install(self, name: impl Into<String>) -> Self {
        self.install_partial(name, &GenericFamily::ALL)
    }

    /// Install a font that only diverges from `generics`.
    ///
    /// Against any other generic it measures exactly like the fallback,
    /// which is how a font lacking the probed glyphs behaves.
    #[must_use]
    pub fn install_partial(mut self, name: impl Into<String>, generics: &[GenericFamily]) -> Self {
        self.installed.insert(name.into(), generics.to_vec());
        self
    }

    /// Every measurement of a stack naming `name` fails.
    #[must_use]
    pub fn fail_font(mut self, name: impl Into<String>) -> Self {
        self.failing_fonts.insert(name.into());
        self
    }

    /// Measuring `generic` alone fails.
    #[must_use]
    pub fn fail_generic(mut self, generic: GenericFamily) -> Self {
        self.failing_generics.insert(generic);
        self
    }

    /// Number of `measure` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn generic_metrics(generic: GenericFamily, text: &str, size_px: f32) -> Measurement {
        let advance = match generic {
            GenericFamily::Monospace => 0.60,
            GenericFamily::Serif => 0.50,
            GenericFamily::SansSerif => 0.55,
        };
        glyph_box(text, size_px, advance, 1.15)
    }

    fn face_metrics(name: &str, text: &str, size_px: f32) -> Measurement {
        // Spread installed faces apart from each other too.
        let jitter = f32::from(u8::try_from(name.len() % 8).unwrap_or(0)) * 0.01;
        glyph_box(text, size_px, 0.70 + jitter, 1.30)
    }
}

#[allow(clippy::cast_precision_loss)]
fn glyph_box(text: &str, size_px: f32, advance: f32, line_height: f32) -> Measurement {
    let chars = text.chars().count() as f32;
    Measurement::new(
        (chars * size_px * advance).round(),
        (size_px * line_height).round(),
    )
}

impl MetricProberPort for ScriptedProber {
    fn measure(&self, stack: &FontStack, text: &str, size_px: f32) -> ProbeResult<Measurement> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let generic = stack
            .generic_fallback()
            .ok_or_else(|| ProbeError::InvalidStack(stack.to_string()))?;

        let named = stack.families().iter().find_map(|family| match family {
            FontFamily::Named(name) => Some(name.as_str()),
            FontFamily::Generic(_) => None,
        });

        match named {
            Some(name) if self.failing_fonts.contains(name) => Err(ProbeError::MeasurementFailed {
                stack: stack.to_string(),
                reason: "scripted failure".to_string(),
            }),
            Some(name) => match self.installed.get(name) {
                Some(diverges) if diverges.contains(&generic) => {
                    Ok(Self::face_metrics(name, text, size_px))
                }
                _ => Ok(Self::generic_metrics(generic, text, size_px)),
            },
            None if self.failing_generics.contains(&generic) => {
                Err(ProbeError::MeasurementFailed {
                    stack: stack.to_string(),
                    reason: "scripted generic failure".to_string(),
                })
            }
            None => Ok(Self::generic_metrics(generic, text, size_px)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_font_diverges_from_generic() {
        let prober = ScriptedProber::with_installed(["Arial"]);
        let base = prober
            .measure(&FontStack::generic(GenericFamily::Serif), "abc", 72.0)
            .unwrap();
        let arial = prober
            .measure(&FontStack::candidate("Arial", GenericFamily::Serif), "abc", 72.0)
            .unwrap();
        assert!(arial.differs_from(&base, 1.0));
        assert_eq!(prober.call_count(), 2);
    }

    #[test]
    fn test_missing_font_falls_back() {
        let prober = ScriptedProber::new();
        let base = prober
            .measure(&FontStack::generic(GenericFamily::Monospace), "abc", 72.0)
            .unwrap();
        let missing = prober
            .measure(
                &FontStack::candidate("Nope", GenericFamily::Monospace),
                "abc",
                72.0,
            )
            .unwrap();
        assert_eq!(base, missing);
    }

    #[test]
    fn test_stack_without_generic_is_invalid() {
        let prober = ScriptedProber::new();
        let stack = FontStack::from_families(vec![FontFamily::Named("Arial".into())]);
        assert!(matches!(
            prober.measure(&stack, "abc", 72.0),
            Err(ProbeError::InvalidStack(_))
        ));
    }
}
