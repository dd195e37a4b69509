//! Font descriptors exchanged with external collaborators.
//!
//! `FontEntry` values are produced only by a privileged enumeration adapter;
//! `FontFaceDeclaration` values come from the candidate catalog.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default CSS weight for faces that do not report one.
pub const DEFAULT_FONT_WEIGHT: u16 = 400;

/// Prefix of alias families registered for enumerated local faces.
pub const LOCAL_ALIAS_PREFIX: &str = "__local_font_";

/// Face style as reported by an enumeration backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Descriptor of one locally installed face, supplied by the privileged
/// enumeration collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontEntry {
    /// Family name, e.g. `Noto Sans`.
    pub family: String,
    /// Full face name, e.g. `Noto Sans Bold Italic`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// PostScript name, e.g. `NotoSans-BoldItalic`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postscript_name: Option<String>,
    /// CSS weight (100-900).
    #[serde(default = "default_weight")]
    pub weight: u16,
    #[serde(default)]
    pub style: FontStyle,
}

const fn default_weight() -> u16 {
    DEFAULT_FONT_WEIGHT
}

impl FontEntry {
    /// Create an entry with only a family name.
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            full_name: None,
            postscript_name: None,
            weight: DEFAULT_FONT_WEIGHT,
            style: FontStyle::Normal,
        }
    }

    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn with_postscript_name(mut self, postscript_name: impl Into<String>) -> Self {
        self.postscript_name = Some(postscript_name.into());
        self
    }

    #[must_use]
    pub const fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    #[must_use]
    pub const fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Name shown to consumers: full name, then PostScript name, then family.
    pub fn display_name(&self) -> Option<&str> {
        [
            self.full_name.as_deref(),
            self.postscript_name.as_deref(),
            Some(self.family.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
    }
}

/// Deduplicated, lexicographically sorted display names of enumerated faces.
pub fn display_names(entries: &[FontEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(FontEntry::display_name)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// An alias family that makes one exact local face addressable by name.
///
/// Equivalent to
/// `@font-face { font-family: '<alias>'; src: local('<full>'), local('<ps>'); }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFaceAlias {
    /// Alias family name (`__local_font_<n>`).
    pub alias: String,
    /// Local face names to resolve, in priority order.
    pub sources: Vec<String>,
    pub weight: u16,
    pub style: FontStyle,
}

/// Build one alias per entry that carries a full or PostScript name.
///
/// Entries with neither are skipped; alias indices stay dense.
pub fn build_local_aliases(entries: &[FontEntry]) -> Vec<LocalFaceAlias> {
    let mut aliases = Vec::new();
    for entry in entries {
        let full = entry.full_name.as_deref().map(str::trim).unwrap_or_default();
        let post = entry
            .postscript_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        let mut sources = Vec::with_capacity(2);
        if !full.is_empty() {
            sources.push(full.to_string());
        }
        if !post.is_empty() && post != full {
            sources.push(post.to_string());
        }
        if sources.is_empty() {
            continue;
        }

        aliases.push(LocalFaceAlias {
            alias: format!("{LOCAL_ALIAS_PREFIX}{}", aliases.len()),
            sources,
            weight: entry.weight,
            style: entry.style,
        });
    }
    aliases
}

/// Where a declared face's data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceSource {
    /// A font file on disk.
    File(PathBuf),
    /// In-memory font data.
    Binary(Vec<u8>),
}

/// A supplementary font-face resource declared by the catalog.
///
/// Registered with the measurement environment before detection so that
/// delivered (non-installed) fonts can also be probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFaceDeclaration {
    /// Family name the face is registered under.
    pub family: String,
    pub source: FaceSource,
}

impl FontFaceDeclaration {
    pub fn file(family: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            family: family.into(),
            source: FaceSource::File(path.into()),
        }
    }

    pub fn binary(family: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            family: family.into(),
            source: FaceSource::Binary(data),
        }
    }
}
