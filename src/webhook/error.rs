//! Error types for webhook dispatch.

use thiserror::Error;

use crate::client::ApiError;

/// Error produced while dispatching a webhook event.
///
/// Unrecognized payloads are not errors; they are silently ignored.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The final-document download kept failing until the retry policy
    /// gave up.
    #[error("Download failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts performed
        attempts: u32,
        /// The failure observed on the last attempt
        #[source]
        last_error: ApiError,
    },
}
