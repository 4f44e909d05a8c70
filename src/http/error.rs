//! Error types for request assembly and HTTP transport.

use std::path::PathBuf;

use thiserror::Error;

/// Error produced while assembling a request descriptor.
///
/// These indicate programming errors in the calling code rather than
/// runtime conditions, and are surfaced eagerly instead of reaching the
/// remote API.
#[derive(Debug, Error)]
pub enum RequestError {
    /// No HTTP method was set before the descriptor was built.
    #[error("Request has no HTTP method")]
    MissingMethod,

    /// No path was set before the descriptor was built.
    #[error("Request has no path")]
    MissingPath,

    /// The path could not be joined onto the API base URL.
    #[error("Invalid request path '{path}': {source}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// Header name or value is not valid HTTP header syntax.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// Header name as supplied
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A file parameter was supplied with a non-path value.
    #[error("File parameter '{key}' must be a path string")]
    InvalidFileParam {
        /// Parameter key as supplied
        key: String,
    },

    /// A parameter targeted a body kind incompatible with the body
    /// already accumulated on the descriptor.
    #[error("Cannot add {requested} content to a {existing} body")]
    BodyConflict {
        /// Kind of the body already present
        existing: &'static str,
        /// Kind of content the caller tried to add
        requested: &'static str,
    },
}

/// Error type for HTTP transport operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// These errors are typically retryable at the caller's discretion.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A multipart file part could not be read from disk.
    #[error("Failed to read file part '{}': {source}", path.display())]
    FileRead {
        /// Path of the file part
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A multipart body part could not be encoded.
    #[error("Invalid multipart part: {0}")]
    Multipart(String),
}
