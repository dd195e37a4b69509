//! CLI entry point.
//!
//! Parses arguments, installs logging and dispatches to handlers. All
//! infrastructure is wired in `bootstrap`.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use fontscout_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(u8::try_from(exit_code_for(&err)).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig {
        data_dir: cli.data_dir,
        settings_file: cli.settings,
    };

    match command {
        Commands::Paths => handlers::paths::execute(config.data_dir.as_deref()),
        Commands::Catalog { catalog } => handlers::catalog::execute(catalog.as_deref()),
        Commands::Detect(args) => {
            let ctx = bootstrap(config).await?;
            handlers::detect::execute(&ctx, args).await
        }
        Commands::Cache { command } => {
            let ctx = bootstrap(config).await?;
            handlers::cache::execute(&ctx, command).await
        }
    }
}
