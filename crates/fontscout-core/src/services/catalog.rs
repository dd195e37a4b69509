//! Candidate font names and declared font-face resources.

use std::collections::{BTreeSet, HashSet};

use sha2::{Digest, Sha256};

use crate::domain::FontFaceDeclaration;

/// Hex characters kept from the catalog digest.
const FINGERPRINT_LEN: usize = 16;

/// Well-known font names, grouped loosely by category.
const BUILTIN_NAMES: &[&str] = &[
    // Sans / UI
    "Arial",
    "Helvetica",
    "Helvetica Neue",
    "Verdana",
    "Tahoma",
    "Trebuchet MS",
    "Segoe UI",
    "Segoe UI Variable",
    "Segoe UI Symbol",
    "System UI",
    "Ubuntu",
    "Cantarell",
    "Noto Sans",
    "DejaVu Sans",
    "Liberation Sans",
    "Open Sans",
    "Roboto",
    "Inter",
    "Poppins",
    "Lato",
    "Nunito",
    "Work Sans",
    "Raleway",
    "Montserrat",
    "Space Grotesk",
    "Graphik",
    "Avenir",
    "Avenir Next",
    "Futura",
    "Gill Sans",
    "Optima",
    // Serif
    "Times",
    "Times New Roman",
    "Georgia",
    "Garamond",
    "Palatino",
    "Book Antiqua",
    "Baskerville",
    "Didot",
    "Hoefler Text",
    "Cambria",
    "Constantia",
    "Merriweather",
    "Playfair Display",
    "Source Serif Pro",
    "Noto Serif",
    "DejaVu Serif",
    "Liberation Serif",
    // Monospace
    "Courier",
    "Courier New",
    "Consolas",
    "Monaco",
    "Menlo",
    "Lucida Console",
    "Inconsolata",
    "Source Code Pro",
    "JetBrains Mono",
    "Fira Code",
    "Fira Mono",
    "Cascadia Code",
    "IBM Plex Mono",
    "Space Mono",
    "Liberation Mono",
    "DejaVu Sans Mono",
    "Noto Mono",
    // Display
    "Impact",
    "Comic Sans MS",
    "Copperplate",
    "American Typewriter",
    "Lobster",
    "Pacifico",
    "Oswald",
    "Zilla Slab",
    "Quicksand",
    // CJK and emoji
    "Microsoft YaHei",
    "Microsoft JhengHei",
    "MS Gothic",
    "Meiryo",
    "SimSun",
    "SimHei",
    "PingFang SC",
    "Hiragino Sans",
    "Noto Sans CJK JP",
    "Noto Sans CJK SC",
    "Noto Sans CJK TC",
    "Noto Color Emoji",
    "Apple Color Emoji",
    "Segoe UI Emoji",
];

/// Ordered, deduplicated candidate names plus faces to register first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateCatalog {
    names: Vec<String>,
    faces: Vec<FontFaceDeclaration>,
}

impl CandidateCatalog {
    /// Build a catalog. The first occurrence of a name wins; blank names are
    /// dropped. Names are trimmed before comparison.
    pub fn new<I, S>(names: I, faces: Vec<FontFaceDeclaration>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let names = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                (!name.is_empty() && seen.insert(name.to_string())).then(|| name.to_string())
            })
            .collect();

        Self { names, faces }
    }

    /// The built-in list of well-known fonts, without declared faces.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_NAMES.iter().copied(), Vec::new())
    }

    /// Parse one name per line. Blank lines and `#` comments are ignored.
    pub fn from_text(text: &str) -> Self {
        let names = text.lines().filter(|line| !line.trim_start().starts_with('#'));
        Self::new(names, Vec::new())
    }

    /// Add declared faces. Their families join the candidate list.
    #[must_use]
    pub fn with_faces(self, faces: Vec<FontFaceDeclaration>) -> Self {
        let mut all_faces = self.faces;
        all_faces.extend(faces);
        let names = self
            .names
            .into_iter()
            .chain(all_faces.iter().map(|face| face.family.clone()))
            .collect::<Vec<_>>();
        Self::new(names, all_faces)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn faces(&self) -> &[FontFaceDeclaration] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Order-independent content hash of the name set.
    ///
    /// SHA-256 over the sorted names joined with `|`, truncated to 16 hex
    /// characters. Declared faces do not take part.
    pub fn fingerprint(&self) -> String {
        let sorted: BTreeSet<&str> = self.names.iter().map(String::as_str).collect();
        let joined = sorted.into_iter().collect::<Vec<_>>().join("|");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        let mut digest = format!("{:x}", hasher.finalize());
        digest.truncate(FINGERPRINT_LEN);
        digest
    }
}
