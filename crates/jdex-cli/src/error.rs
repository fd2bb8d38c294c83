//! CLI error handling with semantic exit codes.
//!
//! Every failure maps onto an [`ErrorCategory`] whose discriminant is the
//! process exit code, so scripts can branch on what went wrong.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Lookup answered |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments, reference syntax or configuration |
//! | 3 | `NotFound` | No class, method or package matched |
//! | 4 | `Ambiguous` | Several classes or overloads matched |
//! | 5 | `Network` | Fetch failure or non-success HTTP status |
//! | 6 | `Timeout` | A page fetch timed out |
//! | 7 | `Malformed` | A page lacks the layout the scraper expects |
//! | 8 | `Index` | The site could not be indexed |
//!
//! ```bash
//! jdex method 'List#add'
//! case $? in
//!     0) echo "found" ;;
//!     4) echo "pick an overload" ;;
//!     *) echo "failed" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments, method reference or configuration (exit code 2).
    Usage = 2,

    /// Nothing matched the query (exit code 3).
    NotFound = 3,

    /// The query matched several classes or overloads (exit code 4).
    Ambiguous = 4,

    /// Network or fetch failure (exit code 5).
    Network = 5,

    /// A page fetch exceeded its time limit (exit code 6).
    Timeout = 6,

    /// A fetched page does not look like a Javadoc 8 page (exit code 7).
    Malformed = 7,

    /// The class listing could not be indexed (exit code 8).
    Index = 8,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Ambiguous => "ambiguous",
            Self::Network => "network error",
            Self::Timeout => "timeout",
            Self::Malformed => "malformed page",
            Self::Index => "index error",
        }
    }

    /// Category of an engine error.
    #[must_use]
    pub const fn from_core(err: &jdex_core::Error) -> Self {
        use jdex_core::Error;

        match err {
            Error::Network(_) | Error::HttpStatus { .. } => Self::Network,
            Error::Timeout(_) => Self::Timeout,
            Error::MalformedPage { .. } | Error::UnknownTag(_) => Self::Malformed,
            Error::InvalidLink(_) | Error::Config(_) => Self::Usage,
            Error::NotFound(_) => Self::NotFound,
            Error::Ambiguous { .. } => Self::Ambiguous,
            Error::Index(_) => Self::Index,
            Error::Io(_) => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` so context chains survive to the final report.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a CLI error, taking the category from a wrapped engine error.
    ///
    /// Errors that neither are a `CliError` nor carry a `jdex_core::Error`
    /// anywhere in their chain are internal.
    pub fn inferred(source: impl Into<anyhow::Error>) -> Self {
        let source = source.into();
        if let Some(cli) = source.downcast_ref::<Self>() {
            return Self::new(cli.category, source);
        }
        let category = source
            .chain()
            .find_map(|cause| cause.downcast_ref::<jdex_core::Error>())
            .map_or(ErrorCategory::Internal, ErrorCategory::from_core);
        Self { category, source }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a not-found error.
    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::NotFound, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }

    /// Create an `ExitCode` from this error.
    #[must_use]
    pub fn as_exit_code(&self) -> ExitCode {
        self.category.as_exit_code()
    }
}

impl From<jdex_core::Error> for CliError {
    fn from(err: jdex_core::Error) -> Self {
        Self::new(ErrorCategory::from_core(&err), err)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Determine the exit code from an `anyhow::Error`.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    err.chain()
        .find_map(|cause| cause.downcast_ref::<jdex_core::Error>())
        .map_or(ErrorCategory::Internal, ErrorCategory::from_core)
        .exit_code()
}
