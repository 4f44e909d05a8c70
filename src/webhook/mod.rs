//! Webhook layer for classifying and dispatching inbound document events.
//!
//! This module provides types and traits for:
//! - Payload classification ([`classify`], [`WebhookEvent`])
//! - The handler interface integrations implement ([`WebhookHandler`])
//! - Dispatching with a retrying final-document download
//!   ([`WebhookDispatcher`])
//! - Retry policy configuration ([`RetryPolicy`])
//!
//! The webhook endpoint itself lives in the integrating application; it
//! should pass each received JSON body to
//! [`WebhookDispatcher::dispatch`] and answer the remote service with
//! HTTP 200 and an empty body whatever the outcome, so transient local
//! failures are not replayed as delivery failures.

mod dispatcher;
mod error;
mod event;
mod handler;
mod retry;

#[cfg(test)]
mod event_tests;

pub use dispatcher::WebhookDispatcher;
pub use error::WebhookError;
pub use event::{DOCUMENT_COMPLETED, WebhookEvent, classify};
pub use handler::WebhookHandler;
pub use retry::RetryPolicy;
