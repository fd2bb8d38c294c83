//! Command implementations for the jdex CLI
//!
//! Every command turns a catalog lookup into an [`Answer`] and hands it to
//! [`deliver`], which prints it and decides the exit status.

mod lookup;
mod shell;
mod stats;

use anyhow::{Result, anyhow};
use jdex_core::Catalog;

use crate::cli::Commands;
use crate::error::{CliError, ErrorCategory};
use crate::output::{OutputFormat, Report, TextFormatter};

pub use lookup::{class, method, package};
pub use shell::execute as shell;
pub use stats::execute as stats;

/// What a command produced.
#[derive(Debug)]
pub enum Answer {
    /// The lookup succeeded.
    Found(Report),
    /// The lookup was understood but did not single out one entity.
    Miss(Report, ErrorCategory),
    /// Resolution failed.
    Failed(jdex_core::Error),
}

/// Run one subcommand against an open catalog.
///
/// # Errors
///
/// Returns a [`CliError`] carrying the exit category when the lookup missed
/// or failed.
pub async fn execute(command: &Commands, catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let answer = match command {
        Commands::Class { name } => class(catalog, name).await,
        Commands::Method { reference } => method(catalog, reference).await,
        Commands::Package { name } => package(catalog, name).await,
        Commands::Stats => stats(catalog).await,
        Commands::Shell => return shell(catalog, format).await,
    };
    deliver(answer, format)
}

/// Print an answer for a one-shot command.
///
/// Misses and failures are returned as errors so the process exits with
/// their category. Machine-readable output still gets its JSON record on
/// stdout.
pub fn deliver(answer: Answer, format: OutputFormat) -> Result<()> {
    match answer {
        Answer::Found(report) => {
            println!("{}", report.render(format)?);
            Ok(())
        },
        Answer::Miss(report, category) => {
            if format.is_machine_readable() {
                println!("{}", report.render(format)?);
            }
            Err(CliError::new(category, anyhow!(TextFormatter::render(&report))).into())
        },
        Answer::Failed(err) => {
            if format.is_machine_readable() {
                println!("{}", failure_report(&err).render(format)?);
            }
            Err(CliError::from(err).into())
        },
    }
}

fn failure_report(err: &jdex_core::Error) -> Report {
    Report::Failed {
        category: err.category(),
        message: err.to_string(),
    }
}
