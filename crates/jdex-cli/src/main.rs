//! jdex CLI entry point
//!
//! Maps failures onto the exit codes documented in `jdex_cli::error`.

use std::process::ExitCode;

use colored::Colorize;
use jdex_cli::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match jdex_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let err = match err.downcast::<CliError>() {
                Ok(cli_err) => cli_err,
                Err(other) => CliError::inferred(other),
            };
            eprintln!("{} {:#}", "error:".red().bold(), err.source);
            err.as_exit_code()
        },
    }
}
