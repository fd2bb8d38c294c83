//! jdex CLI - look classes, methods and packages up on a Javadoc site
//!
//! Every invocation indexes the configured site once, then answers the
//! requested lookup (or, for `shell`, every lookup read from stdin).

use anyhow::Result;
use clap::Parser;
use jdex_core::Catalog;
use tracing::info;

mod cli;
mod commands;
pub mod error;
mod output;
mod utils;

pub use cli::{Cli, Commands};
pub use output::OutputFormat;

use crate::error::CliError;
use crate::utils::{initialize_logging, resolve_settings};

/// Execute the jdex CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error (usually a [`CliError`]) if settings are invalid, the
/// site cannot be indexed, or the lookup missed or failed.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute(&cli).await
}

/// Execute an already parsed command line.
///
/// # Errors
///
/// See [`run`].
pub async fn execute(cli: &Cli) -> Result<()> {
    let settings = resolve_settings(cli).map_err(CliError::inferred)?;
    info!(base_url = %settings.base_url(), "indexing site");
    let catalog = Catalog::from_settings(&settings)
        .await
        .map_err(CliError::from)?;

    commands::execute(&cli.command, &catalog, cli.format).await
}
