//! Inbound webhook payload classification.

use serde::Deserialize;
use serde_json::Value;

/// Event type literal identifying a completed document.
pub const DOCUMENT_COMPLETED: &str = "document_completed";

/// Classification of an inbound webhook payload.
///
/// Ephemeral: exists only for the duration of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    /// All signers finished; the final PDF is ready for download.
    DocumentCompleted {
        /// Hash of the completed document
        document_hash: String,
        /// Time the event occurred, as reported by the service
        event_time: String,
        /// Hash identifying the event delivery
        event_hash: String,
        /// The payload's `meta` block, untyped
        meta: Value,
    },
    /// Any other lifecycle change on a known document.
    DocumentChanged {
        /// Hash of the affected document
        document_hash: String,
        /// Kind of change (e.g. `document_signed`)
        event_type: String,
        /// Time the event occurred, as reported by the service
        event_time: String,
        /// The payload's `meta` block, untyped
        meta: Value,
    },
    /// Payload did not match a known event shape. Ignored without
    /// error.
    Unrecognized,
}

/// Exact shape of a completed-document event.
///
/// The `related_*` id fields only need to be present; their values are
/// not interpreted.
#[derive(Debug, Deserialize)]
struct CompletedPayload {
    event_type: String,
    event_time: String,
    event_hash: String,
    meta: CompletedMeta,
}

#[derive(Debug, Deserialize)]
struct CompletedMeta {
    related_document_hash: String,
    #[allow(dead_code)]
    related_user_id: Value,
    #[allow(dead_code)]
    related_business_id: Value,
    #[allow(dead_code)]
    related_app_id: Value,
}

/// General shape shared by all document lifecycle events.
#[derive(Debug, Deserialize)]
struct ChangedPayload {
    event_type: String,
    event_time: String,
    #[allow(dead_code)]
    event_hash: String,
    meta: ChangedMeta,
}

#[derive(Debug, Deserialize)]
struct ChangedMeta {
    related_document_hash: String,
}

/// Classifies a raw webhook payload.
///
/// The completed shape is tried first: a payload carrying the full meta
/// block and the [`DOCUMENT_COMPLETED`] event type becomes
/// [`WebhookEvent::DocumentCompleted`]. Everything else with the
/// general lifecycle shape becomes [`WebhookEvent::DocumentChanged`],
/// and anything that matches neither is
/// [`WebhookEvent::Unrecognized`].
#[must_use]
pub fn classify(payload: &Value) -> WebhookEvent {
    let meta = || payload.get("meta").cloned().unwrap_or(Value::Null);

    if let Ok(event) = serde_json::from_value::<CompletedPayload>(payload.clone()) {
        if event.event_type == DOCUMENT_COMPLETED {
            return WebhookEvent::DocumentCompleted {
                document_hash: event.meta.related_document_hash,
                event_time: event.event_time,
                event_hash: event.event_hash,
                meta: meta(),
            };
        }
        // Full meta block but a different event type: fall through to
        // the general shape.
    }

    if let Ok(event) = serde_json::from_value::<ChangedPayload>(payload.clone()) {
        return WebhookEvent::DocumentChanged {
            document_hash: event.meta.related_document_hash,
            event_type: event.event_type,
            event_time: event.event_time,
            meta: meta(),
        };
    }

    WebhookEvent::Unrecognized
}
