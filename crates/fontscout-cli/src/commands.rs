//! Main commands enum and primary subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use fontscout_core::{FontFaceDeclaration, PermissionState};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Detect which fonts are available
    Detect(DetectArgs),

    /// Show the candidate catalog and its fingerprint
    Catalog {
        /// Read candidate names from a file (one per line, '#' comments)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Manage cached detection results
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    /// Show resolved paths for all fontscout directories
    Paths,
}

/// Cache maintenance subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCommand {
    /// Remove every cached detection result
    Clear,
}

/// Whether local font enumeration may be used.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalFontsAccess {
    /// List installed fonts directly
    Granted,
    /// Same as granted; there is no interactive prompt on the command line
    Prompt,
    /// Never list installed fonts; always use heuristic detection
    #[default]
    Denied,
}

impl From<LocalFontsAccess> for PermissionState {
    fn from(access: LocalFontsAccess) -> Self {
        match access {
            LocalFontsAccess::Granted => Self::Granted,
            LocalFontsAccess::Prompt => Self::Prompt,
            LocalFontsAccess::Denied => Self::Denied,
        }
    }
}

/// Arguments of `fontscout detect`.
#[derive(Args, Debug, Clone, Default)]
pub struct DetectArgs {
    /// Print JSON (`{ "names": [...], "method": "..." }`)
    #[arg(long)]
    pub json: bool,

    /// Neither read nor write the result cache
    #[arg(long)]
    pub no_cache: bool,

    /// Skip local font enumeration
    #[arg(long)]
    pub heuristic_only: bool,

    /// Only show names containing this text (case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,

    /// Read candidate names from a file (one per line, '#' comments)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Register a font file under a family name before detecting (NAME=PATH)
    #[arg(long = "font-face", value_parser = parse_font_face)]
    pub font_faces: Vec<FontFaceDeclaration>,

    /// Local font enumeration permission
    #[arg(long, value_enum, default_value_t, env = "FONTSCOUT_LOCAL_FONTS")]
    pub local_fonts: LocalFontsAccess,

    /// Override the client identity that scopes cached results
    #[arg(long)]
    pub client_id: Option<String>,

    /// Divergence threshold in pixels
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Reference text size in pixels
    #[arg(long)]
    pub size: Option<f32>,
}

/// Parse a `NAME=PATH` font-face declaration.
pub fn parse_font_face(value: &str) -> Result<FontFaceDeclaration, String> {
    let (name, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got '{value}'"))?;
    let (name, path) = (name.trim(), path.trim());
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected NAME=PATH, got '{value}'"));
    }
    Ok(FontFaceDeclaration::file(name, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn test_parse_font_face() {
        let face = parse_font_face("Brand Sans = /fonts/brand.ttf").unwrap();
        assert_eq!(face, FontFaceDeclaration::file("Brand Sans", "/fonts/brand.ttf"));
        assert!(parse_font_face("no-separator").is_err());
        assert!(parse_font_face("=/fonts/brand.ttf").is_err());
    }

    #[test]
    fn test_detect_defaults() {
        let cli = Cli::parse_from(["fontscout", "detect"]);
        let Some(Commands::Detect(args)) = cli.command else {
            panic!("expected detect");
        };
        assert!(!args.json);
        assert_eq!(args.local_fonts, LocalFontsAccess::Denied);
        assert!(args.font_faces.is_empty());
    }

    #[test]
    fn test_detect_flags() {
        let cli = Cli::parse_from([
            "fontscout",
            "detect",
            "--json",
            "--no-cache",
            "--filter",
            "mono",
            "--font-face",
            "A=/a.ttf",
            "--font-face",
            "B=/b.otf",
            "--local-fonts",
            "granted",
            "--threshold",
            "2",
        ]);
        let Some(Commands::Detect(args)) = cli.command else {
            panic!("expected detect");
        };
        assert!(args.json && args.no_cache);
        assert_eq!(args.filter.as_deref(), Some("mono"));
        assert_eq!(args.font_faces.len(), 2);
        assert_eq!(PermissionState::from(args.local_fonts), PermissionState::Granted);
        assert_eq!(args.threshold, Some(2.0));
    }

    #[test]
    fn test_cache_clear() {
        let cli = Cli::parse_from(["fontscout", "cache", "clear"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Cache {
                command: CacheCommand::Clear
            })
        ));
    }
}
