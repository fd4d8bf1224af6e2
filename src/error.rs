//! Unified error types for chatlinks.
//!
//! The parser and resolver are infallible by contract: unparseable lines are
//! skipped, unparseable dates fall back to the parse clock, and failed
//! previews settle with `error = true`. Errors only surface from the edges of
//! the library:
//!
//! - reading an export from disk
//! - writing output files
//! - building filters from user-supplied dates
//! - constructing the HTTP client
//!
//! [`ResolveError`] is the per-strategy failure type. It is logged and then
//! converted into a placeholder preview; it never crosses the
//! [`MetadataResolver`](crate::resolver::MetadataResolver) boundary.

use std::io;
#[cfg(feature = "resolver")]
use std::time::Duration;

use thiserror::Error;

/// A specialized [`Result`] type for chatlinks operations.
///
/// # Example
///
/// ```rust
/// use chatlinks::error::Result;
/// use chatlinks::ParseResult;
///
/// fn load() -> Result<ParseResult> {
///     Ok(ParseResult::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlinksError>;

/// The error type for all fallible chatlinks operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlinksError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A value doesn't match the expected structure.
    ///
    /// Used for unknown output formats and similar user input.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(any(feature = "json-output", feature = "resolver"))]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client used for previews could not be built.
    #[cfg(feature = "resolver")]
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// A background parse task panicked or was cancelled.
    #[cfg(feature = "async")]
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// UTF-8 encoding error.
    ///
    /// Occurs when file content or output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatlinksError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlinksError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlinksError {
    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlinksError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlinksError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlinksError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlinksError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlinksError::InvalidDate { .. })
    }
}

/// Why a single preview strategy could not produce a preview.
///
/// Every variant is recoverable: the strategy that raised it supplies its
/// own fallback preview.
#[cfg(feature = "resolver")]
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// Transport-level failure (DNS, TLS, connection reset, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// The request did not complete within the configured bound.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The response body was not the JSON shape we expect.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A required field was absent from an otherwise valid response.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    /// The upstream service reported an error in its payload.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// A request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(feature = "resolver")]
impl ResolveError {
    /// Returns `true` if the failure was the timeout bound.
    pub fn is_timeout(&self) -> bool {
        match self {
            ResolveError::Timeout(_) => true,
            ResolveError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
