//! Error types and handling for jdex-core operations.
//!
//! Every fallible operation in the engine returns [`Result<T>`]. Errors are
//! grouped into the families the lookup front end cares about:
//!
//! - **Fetch errors**: network failures, timeouts and non-success HTTP statuses.
//!   Never retried automatically; a later access simply tries again.
//! - **Malformed pages**: a reachable page is missing a structural marker the
//!   scraper relies on. Fatal to that one lookup, not to the index.
//! - **Unknown tags**: markup conversion met an HTML tag without a rule.
//! - **Not found / ambiguous**: user input that matched nothing or too much.
//! - **Ambient**: configuration, I/O and index construction failures.
//!
//! ```rust
//! use jdex_core::Error;
//!
//! let err = Error::MalformedPage {
//!     url: "https://example.org/api/a/Foo.html".to_string(),
//!     reason: "declaration <pre> not found".to_string(),
//! };
//! assert_eq!(err.category(), "malformed_page");
//! assert!(!err.is_recoverable());
//! ```

use thiserror::Error;

/// The main error type for jdex-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed (configuration files, stdin in the shell).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Covers connection failures, TLS problems and body decoding errors
    /// raised by `reqwest`. Timeouts are mapped to [`Error::Timeout`] by the
    /// fetcher so callers can tell them apart.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A page fetch exceeded the configured timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} while fetching '{url}'")]
    HttpStatus {
        /// URL that was requested.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// A reachable page lacks a structural marker the scraper relies on.
    ///
    /// ## Common Causes
    ///
    /// - The documentation site uses a different Javadoc layout
    /// - The URL points at something that is not a class or package page
    #[error("Malformed page '{url}': {reason}")]
    MalformedPage {
        /// URL of the offending page.
        url: String,
        /// Which marker was missing.
        reason: String,
    },

    /// Markup conversion met a tag without a conversion rule.
    #[error("Unknown tag: <{0}>")]
    UnknownTag(String),

    /// A link could not be mapped back onto the documentation site.
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// The requested class, package or method does not exist in the index.
    ///
    /// Lookups report misses through `ClassLookup` and `MethodLookup`; this
    /// variant is for front ends that turn a miss into an error.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested name matches several entities.
    ///
    /// Like [`Error::NotFound`], raised by front ends rather than lookups.
    #[error("'{query}' is ambiguous ({} candidates)", .candidates.len())]
    Ambiguous {
        /// What the user asked for.
        query: String,
        /// Fully qualified names of every match.
        candidates: Vec<String>,
    },

    /// Index construction failed as a whole.
    #[error("Index error: {0}")]
    Index(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Builds a [`Error::MalformedPage`] for `url`.
    pub fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPage {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for the fetch family (network, timeout, HTTP status).
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::HttpStatus { .. }
        )
    }

    /// Check if the error might go away on a later attempt.
    ///
    /// Nothing in jdex retries on its own; this only tells the front end
    /// whether asking again is worthwhile. Lazy fields stay unresolved after a
    /// failure, so the next access re-attempts the fetch.
    ///
    /// ```rust
    /// use jdex_core::Error;
    ///
    /// assert!(Error::Timeout("slow".into()).is_recoverable());
    /// assert!(Error::HttpStatus { url: "u".into(), status: 503 }.is_recoverable());
    /// assert!(!Error::HttpStatus { url: "u".into(), status: 404 }.is_recoverable());
    /// assert!(!Error::NotFound("Foo".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful as a structured logging field:
    ///
    /// ```rust
    /// use jdex_core::Error;
    ///
    /// fn log_error(error: &Error) {
    ///     tracing::warn!(category = error.category(), "{error}");
    /// }
    /// # log_error(&Error::UnknownTag("blink".into()));
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) | Self::HttpStatus { .. } => "network",
            Self::Timeout(_) => "timeout",
            Self::MalformedPage { .. } => "malformed_page",
            Self::UnknownTag(_) => "unknown_tag",
            Self::InvalidLink(_) => "invalid_link",
            Self::NotFound(_) => "not_found",
            Self::Ambiguous { .. } => "ambiguous",
            Self::Index(_) => "index",
            Self::Config(_) => "config",
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("Failed to parse settings: {err}"))
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(format!("Failed to serialize settings: {err}"))
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Timeout("fetch took too long".to_string()),
            Error::malformed("https://x/a/Foo.html", "HR not found"),
            Error::UnknownTag("blink".to_string()),
            Error::InvalidLink("https://elsewhere/Foo.html".to_string()),
            Error::NotFound("Foo".to_string()),
            Error::Index("listing page empty".to_string()),
            Error::Config("timeout must be positive".to_string()),
        ];

        for error in errors {
            let error_string = error.to_string();
            assert!(!error_string.is_empty());
            match error {
                Error::Timeout(msg) => {
                    assert!(error_string.contains("Timeout"));
                    assert!(error_string.contains(&msg));
                },
                Error::MalformedPage { url, reason } => {
                    assert!(error_string.contains(&url));
                    assert!(error_string.contains(&reason));
                },
                Error::UnknownTag(tag) => assert_eq!(error_string, format!("Unknown tag: <{tag}>")),
                Error::InvalidLink(msg) => assert!(error_string.contains(&msg)),
                Error::NotFound(msg) => {
                    assert!(error_string.contains("Not found"));
                    assert!(error_string.contains(&msg));
                },
                Error::Index(msg) => assert!(error_string.contains(&msg)),
                Error::Config(msg) => {
                    assert!(error_string.contains("Configuration error"));
                    assert!(error_string.contains(&msg));
                },
                _ => {},
            }
        }
    }

    #[test]
    fn test_toml_errors_are_configuration_errors() {
        let parse: Error = toml::from_str::<toml::Table>("base_url = ").unwrap_err().into();
        assert_eq!(parse.category(), "config");
        assert!(parse.to_string().contains("Failed to parse settings"));
    }

    #[test]
    fn test_ambiguous_reports_candidate_count() {
        let error = Error::Ambiguous {
            query: "Builder".to_string(),
            candidates: vec!["a.Builder".to_string(), "b.Builder".to_string()],
        };
        assert_eq!(error.to_string(), "'Builder' is ambiguous (2 candidates)");
        assert_eq!(error.category(), "ambiguous");
    }

    #[test]
    fn test_fetch_family() {
        assert!(Error::Timeout("t".into()).is_fetch_error());
        assert!(
            Error::HttpStatus {
                url: "u".into(),
                status: 404
            }
            .is_fetch_error()
        );
        assert!(!Error::malformed("u", "r").is_fetch_error());
        assert!(!Error::UnknownTag("x".into()).is_fetch_error());
    }

    #[test]
    fn test_io_recoverability() {
        let timed_out: Error = io::Error::new(io::ErrorKind::TimedOut, "t").into();
        let denied: Error = io::Error::new(io::ErrorKind::PermissionDenied, "d").into();
        assert!(timed_out.is_recoverable());
        assert!(!denied.is_recoverable());
        assert_eq!(denied.category(), "io");
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err: Error = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
