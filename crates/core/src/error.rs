use thiserror::Error;

/// Result type alias for helpai-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the help widget
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Parse/serialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Validation errors
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed suggestion response
    #[error("malformed response: {0}")]
    Response(#[from] ResponseError),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// A suggestion payload that does not have the expected two-level shape.
///
/// The payload is a JSON object whose `body` field is itself a JSON document
/// carrying an `Answer` string. Each variant names the level that failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// Outer payload is not a JSON object
    #[error("payload is not a JSON object: {reason}")]
    NotJson { reason: String },

    /// Outer object has no string `body` field
    #[error("payload has no string `body` field")]
    MissingBody,

    /// `body` is not a JSON object
    #[error("`body` is not a JSON object: {reason}")]
    BodyNotJson { reason: String },

    /// Inner object has no string `Answer` field
    #[error("`body` has no string `Answer` field")]
    MissingAnswer,
}

impl ResponseError {
    pub fn not_json(reason: impl Into<String>) -> Self {
        Self::NotJson { reason: reason.into() }
    }

    pub fn body_not_json(reason: impl Into<String>) -> Self {
        Self::BodyNotJson { reason: reason.into() }
    }
}

/// Failure reported by the query capability for a single fetch
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Endpoint answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// Response body could not be decoded
    #[error("decode error: {0}")]
    Decode(String),

    /// GraphQL `errors` entries
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),
}

impl FetchError {
    /// Whether a retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) | FetchError::Timeout(_) => true,
            FetchError::Http { status, .. } => *status == 429 || *status >= 500,
            FetchError::Decode(_) | FetchError::GraphQl(_) => false,
        }
    }
}
