//! Error types for Bugspad API operations.

use thiserror::Error;

/// Errors that can occur during Bugspad API operations.
#[derive(Debug, Error)]
pub enum BugspadError {
    /// Configuration is missing or incomplete.
    #[error("Bugspad configuration required: {0}")]
    ConfigMissing(String),

    /// A bug-scoped operation was invoked on a client without a bug id.
    #[error("'{operation}' requires a bug id; this client is not scoped to a bug")]
    MissingBugId { operation: &'static str },

    /// An optional field name outside the accepted whitelist.
    #[error("wrong arguments: unknown optional field '{0}'")]
    UnknownField(String),

    /// An optional field carried a value of the wrong shape.
    #[error("invalid value for field '{field}': expected {expected}")]
    InvalidFieldValue {
        field: &'static str,
        expected: &'static str,
    },

    /// The server rejected the supplied credentials.
    #[error("Authentication failure.")]
    AuthenticationFailed,

    /// The referenced product does not exist on the server.
    #[error("no such product: {product_id}")]
    NoSuchProduct { product_id: u64 },

    /// The server answered with a body the client does not understand.
    #[error("unexpected server response: {message}")]
    UnexpectedResponse { message: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for Bugspad operations.
pub type Result<T> = core::result::Result<T, BugspadError>;
