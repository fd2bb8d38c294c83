//! # Output Formatting
//!
//! Lookup results are printed either as colored text for people or as one
//! JSON document per lookup for scripts.
//!
//! ```bash
//! jdex class List
//! jdex --format json method 'List#add' | jq '.status'
//! ```
//!
//! Every JSON document carries a `status` field (`found`, `not_found`,
//! `ambiguous`, `overloaded`, `failed`) next to the payload.

mod json;
mod text;

use clap::ValueEnum;
use jdex_core::{ClassView, IndexSummary, MethodView, PackageView};
use serde::{Deserialize, Serialize};

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Output format for CLI results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable formatted text (default).
    #[default]
    Text,
    /// JSON for machine consumption.
    Json,
}

impl OutputFormat {
    /// Check if this format is machine-readable.
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// What a single lookup produced, ready to be printed.
#[derive(Debug)]
pub enum Report {
    /// A resolved class.
    Class(ClassView),
    /// A resolved method.
    Method(MethodView),
    /// A resolved package.
    Package(PackageView),
    /// Index facts.
    Summary(IndexSummary),
    /// Nothing matched `query`.
    NotFound {
        /// `class`, `method` or `package`.
        kind: &'static str,
        /// What was asked for.
        query: String,
        /// Close names, best first.
        suggestions: Vec<String>,
    },
    /// Several classes matched `query`.
    Ambiguous {
        /// What was asked for.
        query: String,
        /// Qualified names of the matches.
        candidates: Vec<String>,
    },
    /// Several overloads matched `query`.
    Overloaded {
        /// What was asked for.
        query: String,
        /// `name(params)` of every overload.
        overloads: Vec<String>,
    },
    /// Resolution failed.
    Failed {
        /// Error family, see [`jdex_core::Error::category`].
        category: &'static str,
        /// Rendered error.
        message: String,
    },
}

impl Report {
    /// Renders the report in `format`.
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Text => Ok(TextFormatter::render(self)),
            OutputFormat::Json => JsonFormatter::render(self),
        }
    }
}
