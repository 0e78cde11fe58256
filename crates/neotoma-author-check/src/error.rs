//! Error types for the Neotoma author check.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Each layer owns its enum; callers decide how far a failure travels.

use std::path::PathBuf;
use std::time::Duration;

use crate::models::{Direction, PageIndex};

/// Errors from the upstream HTTP adapters (Neotoma, OpenAlex).
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if the upstream could not be reached or answered abnormally.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout(_) | Self::Server { .. } | Self::UnexpectedStatus { .. }
        )
    }

    /// Returns true if the upstream reported the resource as absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from the verdict store.
///
/// Only writes can fail; reads degrade to an empty collection.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Filesystem error while persisting a partition
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Entry could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Errors from the page navigator.
///
/// Running out of pages is not an error; see [`crate::models::Navigation::Exhausted`].
#[derive(thiserror::Error, Debug)]
pub enum NavigationError {
    /// Neotoma could not be queried for a candidate page
    #[error("Neotoma unavailable while probing page {page}: {source}")]
    Upstream {
        /// Candidate page being fetched
        page: PageIndex,
        /// Adapter failure
        #[source]
        source: ClientError,
    },

    /// Too many consecutive pages were rejected
    #[error("No reviewable page within {steps} steps {direction} of page {start}")]
    StepLimitExceeded {
        /// Page the scan started from
        start: PageIndex,
        /// Scan direction
        direction: Direction,
        /// Candidates examined before giving up
        steps: usize,
    },
}

/// Errors from reviewer actions.
#[derive(thiserror::Error, Debug)]
pub enum ReviewError {
    /// `doi` missing or `action` not recognized
    #[error("Missing parameters!")]
    MissingParameters,

    /// Verdict could not be persisted
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ReviewError {
    /// Convert to a message suitable for the reviewer.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::MissingParameters => "Missing parameters!".to_string(),
            Self::Store(StoreError::Io { path, .. }) => {
                format!("Error: could not save verdict to {}", path.display())
            }
            Self::Store(e) => format!("Error: {e}"),
        }
    }
}

/// Result type alias for adapter operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for store writes.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for navigation.
pub type NavigationResult<T> = Result<T, NavigationError>;

/// Result type alias for reviewer actions.
pub type ReviewResult<T> = Result<T, ReviewError>;
