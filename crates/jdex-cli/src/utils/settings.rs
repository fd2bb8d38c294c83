//! Settings resolution: file first, then flag overrides.

use std::time::Duration;

use anyhow::{Context, Result};
use jdex_core::Settings;
use tracing::debug;

use crate::cli::Cli;

/// Build the effective settings for this invocation.
///
/// `--config` names the file to read; otherwise the platform default is used
/// when it exists. `--base-url`, `--timeout` and `--lenient` win over the file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the result does not validate.
pub fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load().context("failed to load settings")?,
    };

    if let Some(base_url) = &cli.base_url {
        settings = settings.with_base_url(base_url.clone());
    }
    if let Some(secs) = cli.timeout {
        settings = settings.with_timeout(Duration::from_secs(secs));
    }
    if cli.lenient {
        settings = settings.with_ignore_unknown_tags(true);
    }

    settings.validate().context("invalid settings")?;
    debug!(base_url = %settings.base_url(), timeout = ?settings.timeout(), "settings resolved");
    Ok(settings)
}
