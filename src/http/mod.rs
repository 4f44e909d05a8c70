//! HTTP layer: request assembly and the transport seam.
//!
//! This module provides types and traits for:
//! - Building API requests incrementally ([`RequestBuilder`], [`ParamLocation`])
//! - Wire-level request and response types ([`HttpRequest`], [`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod client;
mod error;
mod request;

#[cfg(test)]
mod request_tests;

pub use client::{HttpClient, HttpResponse, ReqwestClient};
pub use error::{HttpError, RequestError};
pub use request::{
    BODY_SENTINEL, HttpRequest, MultipartPart, ParamLocation, PartContent, RequestBody,
    RequestBuilder,
};
