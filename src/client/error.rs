//! Error types for API operations.

use thiserror::Error;

use crate::http::{HttpError, RequestError};

/// Error returned by API operations.
///
/// Operations never retry on their own; every failure is reported to
/// the caller. The webhook dispatcher layers its own retry loop on top
/// of the download operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request descriptor was malformed. This is a programming
    /// error in the calling code, not a runtime condition.
    #[error("Request assembly failed: {0}")]
    Request(#[from] RequestError),

    /// The HTTP transport failed; the underlying error is passed
    /// through unchanged.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The API answered with a non-success HTTP status.
    #[error("API returned status {status}: {body}")]
    Status {
        /// HTTP status code of the response
        status: http::StatusCode,
        /// Response body, or a placeholder when not valid UTF-8
        body: String,
    },

    /// The API acknowledged the request but reported a failure in its
    /// response envelope (`{"success": false, "error": {...}}`).
    #[error("API error '{kind}': {}", info.as_deref().unwrap_or("<no detail>"))]
    Remote {
        /// Machine-readable error type from the envelope
        kind: String,
        /// Human-readable detail, when present
        info: Option<String>,
    },

    /// The response body could not be decoded as the expected shape.
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}
