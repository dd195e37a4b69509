//! Command-line adapter for fontscout.
//!
//! `bootstrap` is the composition root; handlers stay thin.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tokio_test as _;

// Used by main.rs only
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, DiscoveryRequest, bootstrap};
pub use commands::{CacheCommand, Commands, DetectArgs, LocalFontsAccess};
pub use error::{CliError, exit_code_for};
pub use parser::Cli;
