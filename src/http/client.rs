//! HTTP client trait and the production reqwest implementation.

use super::error::HttpError;
use super::request::{HttpRequest, MultipartPart, PartContent, RequestBody};

/// An HTTP response received from the API.
///
/// Contains the status code, headers, and body of the response.
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Trait for dispatching assembled requests.
///
/// # Design
///
/// This trait abstracts the HTTP client implementation, enabling:
/// - Dependency injection for testing with mock transports
/// - Swapping HTTP libraries without changing calling code
///
/// Request encoding (query escaping, JSON serialization, multipart
/// framing) happens inside the implementation; callers only deal in
/// [`HttpRequest`] descriptors.
///
/// # Example
///
/// ```ignore
/// use eversign::http::{HttpClient, HttpRequest, HttpResponse, HttpError};
///
/// struct MockTransport {
///     response: HttpResponse,
/// }
///
/// impl HttpClient for MockTransport {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when:
    /// - Network connection fails ([`HttpError::Connection`])
    /// - Request times out ([`HttpError::Timeout`])
    /// - URL is invalid ([`HttpError::InvalidUrl`])
    /// - A file part cannot be read ([`HttpError::FileRead`])
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements the
/// [`HttpClient`] trait, encoding JSON, form, and multipart bodies as
/// the request descriptor demands. The default construction applies the
/// configured request timeout.
///
/// # Example
///
/// ```no_run
/// use eversign::http::{ReqwestClient, HttpClient, RequestBuilder, ParamLocation};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let base = url::Url::parse("https://api.eversign.com/api")?;
/// let mut builder = RequestBuilder::new();
/// builder.set_method(http::Method::GET);
/// builder.set_path("document");
/// builder.add_param(ParamLocation::Query, "access_key", "key")?;
///
/// let client = ReqwestClient::new();
/// let response = client.request(builder.build(&base)?).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the default request timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(crate::config::DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    #[must_use]
    pub fn with_timeout(timeout: std::time::Duration) -> Self {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { inner }
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (proxies, TLS, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        builder = match req.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts).await?),
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidUrl(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Connection(Box::new(e)))?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

/// Converts accumulated multipart parts into a reqwest form.
///
/// File-path parts are read from disk here so file errors surface
/// through the same result as transport errors.
async fn build_form(parts: Vec<MultipartPart>) -> Result<reqwest::multipart::Form, HttpError> {
    let mut form = reqwest::multipart::Form::new();

    for part in parts {
        let piece = match part.content {
            PartContent::JsonField(value) => reqwest::multipart::Part::text(value.to_string())
                .mime_str("application/json")
                .map_err(|e| HttpError::Multipart(e.to_string()))?,
            PartContent::FilePath(path) => {
                let file_name = path
                    .file_name()
                    .map_or_else(|| "file".to_owned(), |n| n.to_string_lossy().into_owned());
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|source| HttpError::FileRead { path, source })?;
                reqwest::multipart::Part::bytes(bytes).file_name(file_name)
            }
            PartContent::FileBytes { file_name, bytes } => {
                reqwest::multipart::Part::bytes(bytes).file_name(file_name)
            }
        };
        form = form.part(part.name, piece);
    }

    Ok(form)
}
