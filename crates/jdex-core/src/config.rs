//! Configuration for the jdex engine.
//!
//! Settings are stored as TOML in the platform config directory and fall back
//! to sensible defaults when no file exists. Command-line flags layered on top
//! by the CLI always win over the file.
//!
//! ## File Location
//!
//! - Linux: `~/.config/jdex/settings.toml`
//! - macOS: `~/Library/Application Support/dev.jdex.jdex/settings.toml`
//! - Windows: `%APPDATA%\jdex\jdex\config\settings.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://docs.oracle.com/javase/8/docs/api/"
//!
//! [fetch]
//! timeout_secs = 30
//! user_agent = "jdex/0.3.0"
//!
//! [markup]
//! ignore_unknown_tags = false
//! ```
//!
//! ```rust
//! use jdex_core::Settings;
//!
//! let settings = Settings::default().with_base_url("https://example.org/api");
//! assert_eq!(settings.base_url(), "https://example.org/api/");
//! settings.validate()?;
//! # Ok::<(), jdex_core::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Documentation site indexed when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://docs.oracle.com/javase/8/docs/api/";

/// Top-level settings for indexing and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the Javadoc site; every scraped URL must live under it.
    pub base_url: String,
    /// HTTP behaviour of the page fetcher.
    pub fetch: FetchSettings,
    /// HTML to text conversion behaviour.
    pub markup: MarkupSettings,
}

/// Page fetcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Connect + read timeout for a single page, in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

/// Markup conversion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupSettings {
    /// Render the children of tags without a conversion rule instead of
    /// failing. Strict conversions that fail are still retried leniently,
    /// with a warning, so a description degrades instead of disappearing.
    pub ignore_unknown_tags: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch: FetchSettings::default(),
            markup: MarkupSettings::default(),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("jdex/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default location, or defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or the
    /// file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read settings: {e}")))?;
        let settings: Self = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write settings as TOML, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write settings: {e}")))?;
        Ok(())
    }

    /// Path of the settings file in the platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "jdex", "jdex")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("settings.toml"))
    }

    /// Replace the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the fetch timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch.timeout_secs = timeout.as_secs();
        self
    }

    /// Set the lenient markup flag.
    #[must_use]
    pub fn with_ignore_unknown_tags(mut self, ignore: bool) -> Self {
        self.markup.ignore_unknown_tags = ignore;
        self
    }

    /// Base URL normalized to end with exactly one `/`.
    pub fn base_url(&self) -> String {
        format!("{}/", self.base_url.trim().trim_end_matches('/'))
    }

    /// Fetch timeout as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs)
    }

    /// Check that the settings can drive an index build.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url();
        let parsed =
            Url::parse(&base).map_err(|e| Error::Config(format!("Invalid base_url '{base}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base_url must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(Error::Config("fetch.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
