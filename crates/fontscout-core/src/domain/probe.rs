//! Measurement primitives: probe strings, generic families, font stacks.
//!
//! These are pure value types shared by the prober port, the baseline table
//! and the presence detector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default probe strings, in iteration order.
///
/// Mixed ascenders/descenders, wide glyphs, digits and punctuation runs give
/// the widest spread of advance widths across typefaces.
pub const DEFAULT_PROBES: [&str; 3] = [
    "mmmmmmlliWWOO123",
    "AaBbCcXxYyZz 0123456789",
    "%%%%@@@####____====",
];

/// A generic family name every environment resolves to *some* installed font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenericFamily {
    Monospace,
    Serif,
    SansSerif,
}

impl GenericFamily {
    /// All generics in detection order.
    pub const ALL: [Self; 3] = [Self::Monospace, Self::Serif, Self::SansSerif];

    /// CSS keyword for this generic.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Monospace => "monospace",
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
        }
    }
}

impl fmt::Display for GenericFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// One entry of a font-family fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A concrete family name, e.g. `Courier New`.
    Named(String),
    /// A generic fallback keyword.
    Generic(GenericFamily),
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => {
                f.write_str("'")?;
                for ch in name.chars() {
                    if ch == '\'' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                f.write_str("'")
            }
            Self::Generic(generic) => f.write_str(generic.css_name()),
        }
    }
}

/// An ordered font-family fallback chain.
///
/// Renders as a CSS `font-family` value: `'Courier New', monospace`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontStack {
    families: Vec<FontFamily>,
}

impl FontStack {
    /// A stack consisting of the generic alone (used for baselines).
    #[must_use]
    pub fn generic(generic: GenericFamily) -> Self {
        Self {
            families: vec![FontFamily::Generic(generic)],
        }
    }

    /// A candidate name followed by a generic fallback.
    #[must_use]
    pub fn candidate(name: &str, generic: GenericFamily) -> Self {
        Self {
            families: vec![
                FontFamily::Named(name.to_string()),
                FontFamily::Generic(generic),
            ],
        }
    }

    /// Build a stack from an explicit chain.
    #[must_use]
    pub const fn from_families(families: Vec<FontFamily>) -> Self {
        Self { families }
    }

    /// The families in fallback order.
    pub fn families(&self) -> &[FontFamily] {
        &self.families
    }

    /// The trailing generic fallback, if the stack ends in one.
    pub fn generic_fallback(&self) -> Option<GenericFamily> {
        match self.families.last() {
            Some(FontFamily::Generic(generic)) => Some(*generic),
            _ => None,
        }
    }
}

impl fmt::Display for FontStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, family) in self.families.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{family}")?;
        }
        Ok(())
    }
}

/// Rendered bounding box of a probe string, in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    pub width: f32,
    pub height: f32,
}

impl Measurement {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension differs from `other` by at least `threshold`.
    #[must_use]
    pub fn differs_from(&self, other: &Self, threshold: f32) -> bool {
        (self.width - other.width).abs() >= threshold
            || (self.height - other.height).abs() >= threshold
    }
}

/// Ordered, non-empty set of probe strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbeSet(Vec<String>);

impl ProbeSet {
    /// Build a probe set; returns `None` when `probes` is empty.
    pub fn new<I, S>(probes: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let probes: Vec<String> = probes.into_iter().map(Into::into).collect();
        if probes.is_empty() {
            None
        } else {
            Some(Self(probes))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ProbeSet {
    fn default() -> Self {
        Self(DEFAULT_PROBES.iter().map(|p| (*p).to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_stack_renders_as_css() {
        let stack = FontStack::candidate("Courier New", GenericFamily::Monospace);
        assert_eq!(stack.to_string(), "'Courier New', monospace");
        assert_eq!(stack.generic_fallback(), Some(GenericFamily::Monospace));
    }

    #[test]
    fn test_named_family_quotes_are_escaped() {
        let stack = FontStack::candidate("It's \\ odd", GenericFamily::SansSerif);
        assert_eq!(stack.to_string(), r"'It\'s \\ odd', sans-serif");
    }

    #[test]
    fn test_generic_order_is_fixed() {
        let names: Vec<_> = GenericFamily::ALL.iter().map(|g| g.css_name()).collect();
        assert_eq!(names, ["monospace", "serif", "sans-serif"]);
    }

    #[test]
    fn test_measurement_threshold_is_inclusive() {
        let a = Measurement::new(100.0, 80.0);
        assert!(a.differs_from(&Measurement::new(101.0, 80.0), 1.0));
        assert!(a.differs_from(&Measurement::new(100.0, 79.0), 1.0));
        assert!(!a.differs_from(&Measurement::new(100.5, 80.5), 1.0));
    }

    #[test]
    fn test_empty_probe_set_is_rejected() {
        assert!(ProbeSet::new(Vec::<String>::new()).is_none());
        assert_eq!(ProbeSet::default().len(), 3);
    }
}
