//! REST operations against the document API.
//!
//! This module provides:
//! - The authenticated API client ([`Client`])
//! - Document models ([`Document`], [`Signer`], [`DocumentType`])
//! - Download options ([`DownloadOptions`])
//! - The operation error type ([`ApiError`])

mod api;
mod document;
mod error;


pub use api::Client;
pub use document::{Document, DocumentType, DownloadOptions, Signer};
pub use error::ApiError;
