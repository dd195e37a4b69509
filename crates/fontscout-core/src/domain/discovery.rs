//! Discovery results and the diagnostics attached to them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Names judged present, sorted lexicographically, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionResult(Vec<String>);

impl DetectionResult {
    /// Normalize any collection of names into a sorted, deduplicated result.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        Self(set.into_iter().collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn into_names(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which path produced a name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMethod {
    /// Privileged enumeration collaborator.
    Api,
    /// Heuristic metric detection (fresh or cached).
    Heuristic,
}

impl fmt::Display for DiscoveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => f.write_str("api"),
            Self::Heuristic => f.write_str("heuristic"),
        }
    }
}

/// Why the privileged enumeration path could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailability {
    /// The environment has no enumeration capability.
    Unsupported,
    /// The user (or policy) denied access.
    PermissionDenied,
    /// The capability answered with no fonts.
    Empty,
    /// The capability failed.
    QueryFailed(String),
}

impl fmt::Display for Unavailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("local font access is not supported"),
            Self::PermissionDenied => f.write_str("permission to access local fonts was denied"),
            Self::Empty => f.write_str("no local fonts were returned"),
            Self::QueryFailed(reason) => write!(f, "local font query failed: {reason}"),
        }
    }
}

/// Why a cache lookup produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheMiss {
    NotFound,
    Expired { age_ms: i64 },
    Malformed(String),
    StoreUnavailable(String),
}

impl fmt::Display for CacheMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("no cached entry"),
            Self::Expired { age_ms } => write!(f, "cached entry expired ({age_ms} ms old)"),
            Self::Malformed(reason) => write!(f, "cached entry is malformed: {reason}"),
            Self::StoreUnavailable(reason) => write!(f, "cache store unavailable: {reason}"),
        }
    }
}

/// A degraded step that did not abort discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    PrivilegedUnavailable(Unavailability),
    AliasRegistrationFailed(String),
    FaceRegistrationFailed(String),
    CacheMiss(CacheMiss),
    CacheSaveFailed(String),
    /// Measurements that failed during the scan and counted as no evidence.
    ProbeFailures { count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivilegedUnavailable(reason) => write!(f, "privileged enumeration: {reason}"),
            Self::AliasRegistrationFailed(reason) => {
                write!(f, "local alias registration failed: {reason}")
            }
            Self::FaceRegistrationFailed(reason) => {
                write!(f, "declared face registration failed: {reason}")
            }
            Self::CacheMiss(miss) => write!(f, "cache: {miss}"),
            Self::CacheSaveFailed(reason) => write!(f, "cache save failed: {reason}"),
            Self::ProbeFailures { count } => write!(f, "{count} probe measurement(s) failed"),
        }
    }
}

/// Consumer-facing output of one discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryOutput {
    pub names: Vec<String>,
    pub method: DiscoveryMethod,
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl DiscoveryOutput {
    pub(crate) fn new(
        names: Vec<String>,
        method: DiscoveryMethod,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            names,
            method,
            diagnostics,
        }
    }

    /// Case-insensitive substring filter, for consumers that narrow the list.
    pub fn filtered(&self, needle: &str) -> Vec<&str> {
        let needle = needle.to_lowercase();
        self.names
            .iter()
            .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_result_is_sorted_and_unique() {
        let result = DetectionResult::from_names(["Menlo", "Arial", "Menlo", "Courier New"]);
        assert_eq!(result.names(), ["Arial", "Courier New", "Menlo"]);
    }

    #[test]
    fn test_output_serializes_names_and_method() {
        let output = DiscoveryOutput::new(
            vec!["Arial".into()],
            DiscoveryMethod::Heuristic,
            vec![Diagnostic::CacheMiss(CacheMiss::NotFound)],
        );
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(json, r#"{"names":["Arial"],"method":"heuristic"}"#);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let output = DiscoveryOutput::new(
            vec!["Courier New".into(), "Noto Mono".into(), "Arial".into()],
            DiscoveryMethod::Api,
            Vec::new(),
        );
        assert_eq!(output.filtered("MONO"), ["Noto Mono"]);
        assert_eq!(output.filtered("").len(), 3);
    }
}
