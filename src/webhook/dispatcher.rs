//! Webhook dispatcher: classify, fetch, hand off to the handler.

use serde_json::Value;

use super::error::WebhookError;
use super::event::{WebhookEvent, classify};
use super::handler::WebhookHandler;
use super::retry::RetryPolicy;
use crate::client::{Client, DownloadOptions};
use crate::http::HttpClient;
use crate::time::{Sleeper, TokioSleeper};

/// Dispatches inbound webhook payloads to a [`WebhookHandler`].
///
/// Completed-document events first fetch the final PDF through the
/// retrying download; changed events go straight to the handler; a
/// payload that fails classification is ignored.
///
/// Dispatch blocks the calling task until the handler returns, which
/// for completed events includes every download attempt and the delays
/// between them. Run it on a worker that tolerates multi-second awaits.
/// There is no cancellation mechanism; a running download loop ends
/// only by success, policy exhaustion, or termination of the enclosing
/// task.
///
/// # Type Parameters
///
/// - `H`: HTTP transport of the wrapped [`Client`]
/// - `W`: the handler implementation
/// - `S`: sleeper used between download attempts (defaults to
///   [`TokioSleeper`])
///
/// # Example
///
/// ```ignore
/// use eversign::client::Client;
/// use eversign::config::Config;
/// use eversign::webhook::WebhookDispatcher;
///
/// let client = Client::new(Config::new("access_key", 1234));
/// let dispatcher = WebhookDispatcher::new(client, MyHandler);
///
/// // In the webhook endpoint:
/// let payload: serde_json::Value = parse_request_body();
/// dispatcher.dispatch(&payload).await?;
/// // ... respond 200 regardless of the outcome
/// ```
#[derive(Debug)]
pub struct WebhookDispatcher<H, W, S = TokioSleeper> {
    client: Client<H>,
    handler: W,
    sleeper: S,
    retry_policy: RetryPolicy,
}

impl<H, W> WebhookDispatcher<H, W, TokioSleeper> {
    /// Creates a dispatcher with the default retry policy and
    /// [`TokioSleeper`] for delays.
    #[must_use]
    pub fn new(client: Client<H>, handler: W) -> Self {
        Self {
            client,
            handler,
            sleeper: TokioSleeper,
            retry_policy: RetryPolicy::new(),
        }
    }
}

impl<H, W, S> WebhookDispatcher<H, W, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> WebhookDispatcher<H, W, S2> {
        WebhookDispatcher {
            client: self.client,
            handler: self.handler,
            sleeper,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the download retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<H: HttpClient, W: WebhookHandler, S: Sleeper> WebhookDispatcher<H, W, S> {
    /// Classifies a payload and invokes at most one handler method.
    ///
    /// Returns `Ok(())` without calling a handler for unrecognized
    /// payloads.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::RetriesExhausted`] when a completed
    /// event's download fails past the retry policy's bound. The
    /// handler is not called in that case.
    pub async fn dispatch(&self, payload: &Value) -> Result<(), WebhookError> {
        match classify(payload) {
            WebhookEvent::DocumentCompleted { document_hash, .. } => {
                let pdf = self.download_with_retry(&document_hash).await?;
                self.handler
                    .on_document_completed(&document_hash, pdf, payload)
                    .await;
                Ok(())
            }
            WebhookEvent::DocumentChanged {
                document_hash,
                event_type,
                event_time,
                ..
            } => {
                self.handler
                    .on_document_changed(&document_hash, &event_type, &event_time, payload)
                    .await;
                Ok(())
            }
            WebhookEvent::Unrecognized => Ok(()),
        }
    }

    /// Fetches the final PDF, retrying on any failure per the policy.
    async fn download_with_retry(&self, document_hash: &str) -> Result<Vec<u8>, WebhookError> {
        let options = DownloadOptions::default();
        let mut attempt: u32 = 1;

        loop {
            tracing::info!(document_hash, attempt, "Fetching final document");

            match self
                .client
                .download_final_document(document_hash, &options)
                .await
            {
                Ok(bytes) => {
                    tracing::info!(document_hash, attempt, "Final document fetched");
                    return Ok(bytes);
                }
                Err(error) => {
                    if !self.retry_policy.should_retry(attempt) {
                        return Err(WebhookError::RetriesExhausted {
                            attempts: attempt,
                            last_error: error,
                        });
                    }
                    tracing::warn!(
                        document_hash,
                        %error,
                        delay = ?self.retry_policy.delay,
                        "Download failed, retrying after delay"
                    );
                    self.sleeper.sleep(self.retry_policy.delay).await;
                    attempt = attempt.saturating_add(1);
                }
            }
        }
    }
}
