//! User-supplied webhook handler interface.

use serde_json::Value;

/// Receives classified document lifecycle events.
///
/// # Design
///
/// The dispatcher only depends on this trait, never on a concrete
/// integration; implementations decide what completion and change
/// events mean for their application, such as archiving the PDF or
/// advancing a workflow.
///
/// # Example
///
/// ```ignore
/// use eversign::webhook::WebhookHandler;
/// use serde_json::Value;
///
/// struct ArchiveHandler;
///
/// impl WebhookHandler for ArchiveHandler {
///     async fn on_document_completed(&self, hash: &str, pdf: Vec<u8>, _payload: &Value) {
///         tokio::fs::write(format!("archive/{hash}.pdf"), pdf).await.ok();
///     }
///
///     async fn on_document_changed(&self, hash: &str, event: &str, _time: &str, _payload: &Value) {
///         println!("{hash}: {event}");
///     }
/// }
/// ```
pub trait WebhookHandler: Send + Sync {
    /// Called when a document completes, after the final PDF has been
    /// downloaded.
    ///
    /// # Arguments
    ///
    /// * `document_hash` - Hash of the completed document
    /// * `pdf` - The downloaded final PDF bytes
    /// * `payload` - The raw webhook payload
    fn on_document_completed(
        &self,
        document_hash: &str,
        pdf: Vec<u8>,
        payload: &Value,
    ) -> impl std::future::Future<Output = ()> + Send;

    /// Called for every other recognized lifecycle change. No download
    /// is performed for these events.
    ///
    /// # Arguments
    ///
    /// * `document_hash` - Hash of the affected document
    /// * `event_type` - Kind of change (e.g. `document_signed`)
    /// * `event_time` - Time the event occurred, as reported
    /// * `payload` - The raw webhook payload
    fn on_document_changed(
        &self,
        document_hash: &str,
        event_type: &str,
        event_time: &str,
        payload: &Value,
    ) -> impl std::future::Future<Output = ()> + Send;
}
