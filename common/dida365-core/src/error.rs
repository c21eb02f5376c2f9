//! Error types for Dida365 operations
//!
//! One enum covers the whole core: credential problems, upstream HTTP
//! failures, locally checkable validation failures, and the wrapped
//! library errors that can surface while talking to the service.

use thiserror::Error;

/// Errors that can occur when talking to Dida365
#[derive(Error, Debug)]
pub enum Dida365Error {
    /// No credential has been saved yet
    #[error("not authenticated - run 'dida365 auth cookie <token>' or 'dida365 auth login' first")]
    Unauthenticated,

    /// The saved credential cannot be used with the selected backend
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The service answered with a non-success status
    #[error("Dida365 API error {status} {method} {path}: {body}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// HTTP method of the failed request
        method: String,
        /// Request path, including any query string
        path: String,
        /// Raw response body
        body: String,
    },

    /// A date range whose start lies after its end
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Start of the requested range (local wall-clock time)
        start: String,
        /// End of the requested range (local wall-clock time)
        end: String,
    },

    /// Not a known IANA timezone name
    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),

    /// A caller-supplied argument was rejected before any request was made
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing or unusable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure (connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON in a request or response body
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A request URL could not be assembled
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem failure while persisting the credential
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Dida365 operations
pub type Result<T> = std::result::Result<T, Dida365Error>;

impl Dida365Error {
    /// HTTP status of an upstream failure, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
