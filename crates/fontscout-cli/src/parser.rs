//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the font discovery tool.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "fontscout")]
#[command(about = "Find out which fonts are available on this machine")]
#[command(version)]
pub struct Cli {
    /// Override the data directory for this invocation (else $FONTSCOUT_DATA_DIR)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Load detection settings from a JSON file
    #[arg(long = "settings", global = true)]
    pub settings: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["fontscout", "--verbose", "--data-dir", "/tmp/fs", "paths"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/fs")));
        assert!(matches!(cli.command, Some(Commands::Paths)));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["fontscout", "catalog", "-v", "--settings", "s.json"]);
        assert!(cli.verbose);
        assert_eq!(cli.settings, Some(PathBuf::from("s.json")));
    }
}
