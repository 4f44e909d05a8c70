//! Authenticated API client issuing document operations.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::document::{Document, DocumentType, DownloadOptions};
use super::error::ApiError;
use crate::config::Config;
use crate::http::{
    BODY_SENTINEL, HttpClient, HttpResponse, ParamLocation, RequestBuilder, ReqwestClient,
};

/// Path for document CRUD operations.
const DOCUMENT_PATH: &str = "document";

/// Path for final PDF downloads.
const DOWNLOAD_FINAL_PATH: &str = "download_final_document";

/// Client for the document API.
///
/// Holds the credentials and an HTTP transport. Every operation builds
/// a request descriptor, injects the credentials, dispatches it, and
/// maps failures into [`ApiError`]. Generic over [`HttpClient`] so
/// tests can substitute a mock transport.
///
/// # Example
///
/// ```no_run
/// use eversign::client::{Client, DocumentType};
/// use eversign::config::Config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::new("access_key", 1234);
/// let client = Client::new(config);
///
/// for document in client.list_documents(DocumentType::Completed).await? {
///     println!("{}", document.document_hash);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<H = ReqwestClient> {
    config: Config,
    http: H,
}

impl Client<ReqwestClient> {
    /// Creates a client using the production HTTP transport with the
    /// configured request timeout.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let http = ReqwestClient::with_timeout(config.timeout);
        Self { config, http }
    }
}

impl<H> Client<H> {
    /// Creates a client over a caller-supplied HTTP transport.
    pub const fn with_http_client(config: Config, http: H) -> Self {
        Self { config, http }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Starts a request descriptor with the credentials injected.
    ///
    /// `access_key`, `business_id`, and `language` go into the query,
    /// which every endpoint requires.
    pub(crate) fn authenticated_request(
        &self,
        method: http::Method,
        path: &str,
    ) -> Result<RequestBuilder, ApiError> {
        let mut builder = RequestBuilder::new();
        builder.set_method(method);
        builder.set_path(path);
        builder.add_param(
            ParamLocation::Query,
            "access_key",
            self.config.access_key.clone(),
        )?;
        builder.add_param(ParamLocation::Query, "business_id", self.config.business_id)?;
        builder.add_param(
            ParamLocation::Query,
            "language",
            self.config.language.clone(),
        )?;
        Ok(builder)
    }
}

impl<H: HttpClient> Client<H> {
    /// Lists documents of the given type.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status,
    /// or an undecodable response.
    pub async fn list_documents(&self, doc_type: DocumentType) -> Result<Vec<Document>, ApiError> {
        let mut builder = self.authenticated_request(http::Method::GET, DOCUMENT_PATH)?;
        builder.add_param(ParamLocation::Query, "type", doc_type.as_str())?;

        let response = self.dispatch(builder).await?;
        decode(&response)
    }

    /// Creates a document from a caller-assembled payload.
    ///
    /// The configured sandbox flag is written into the payload before
    /// sending; a caller-supplied `sandbox` field is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status,
    /// a reported API failure, or an undecodable response.
    pub async fn create_document(&self, payload: Value) -> Result<Document, ApiError> {
        let mut payload = payload;
        if let Some(fields) = payload.as_object_mut() {
            fields.insert("sandbox".to_owned(), Value::from(self.config.sandbox_flag()));
        }

        let mut builder = self.authenticated_request(http::Method::POST, DOCUMENT_PATH)?;
        builder.add_param(ParamLocation::Body, BODY_SENTINEL, payload)?;

        let response = self.dispatch(builder).await?;
        decode(&response)
    }

    /// Fetches a single document by hash.
    ///
    /// Embedded signing URLs are read off the returned document's
    /// signers.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status,
    /// a reported API failure, or an undecodable response.
    pub async fn get_document(&self, document_hash: &str) -> Result<Document, ApiError> {
        let mut builder = self.authenticated_request(http::Method::GET, DOCUMENT_PATH)?;
        builder.add_param(ParamLocation::Query, "document_hash", document_hash)?;

        let response = self.dispatch(builder).await?;
        decode(&response)
    }

    /// Cancels a document. Cancelled documents can afterwards be
    /// deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status,
    /// or a reported API failure.
    pub async fn cancel_document(&self, document_hash: &str) -> Result<(), ApiError> {
        let mut builder = self.authenticated_request(http::Method::DELETE, DOCUMENT_PATH)?;
        builder.add_param(ParamLocation::Query, "document_hash", document_hash)?;
        builder.add_param(ParamLocation::Query, "cancel", 1)?;

        let response = self.dispatch(builder).await?;
        check_envelope(&response.body)
    }

    /// Deletes a document. The remote service only accepts deletion of
    /// drafts and cancelled documents.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status,
    /// or a reported API failure.
    pub async fn delete_document(&self, document_hash: &str) -> Result<(), ApiError> {
        let mut builder = self.authenticated_request(http::Method::DELETE, DOCUMENT_PATH)?;
        builder.add_param(ParamLocation::Query, "document_hash", document_hash)?;

        let response = self.dispatch(builder).await?;
        check_envelope(&response.body)
    }

    /// Downloads the final signed PDF.
    ///
    /// With [`DownloadOptions::url_only`] set, the returned bytes are a
    /// small JSON value carrying a download URL instead of the PDF.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-success status,
    /// or a reported API failure.
    pub async fn download_final_document(
        &self,
        document_hash: &str,
        options: &DownloadOptions,
    ) -> Result<Vec<u8>, ApiError> {
        let mut builder = self.authenticated_request(http::Method::GET, DOWNLOAD_FINAL_PATH)?;
        builder.add_param(ParamLocation::Query, "document_hash", document_hash)?;
        builder.add_optional_params(DownloadOptions::TABLE, options.supplied())?;

        let response = self.dispatch(builder).await?;
        check_envelope(&response.body)?;
        Ok(response.body)
    }

    /// Builds and sends a request, mapping non-success statuses.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<HttpResponse, ApiError> {
        let request = builder.build(&self.config.api_base)?;
        tracing::debug!(method = %request.method, url = %request.url, "Dispatching API request");

        let response = self.http.request(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                body: response
                    .body_text()
                    .unwrap_or("<non-utf8 body>")
                    .to_owned(),
            });
        }
        Ok(response)
    }
}

/// Decodes a JSON response, surfacing the API's failure envelope first.
fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_envelope(&response.body)?;
    serde_json::from_slice(&response.body).map_err(ApiError::Decode)
}

/// The API reports failures as `{"success": false, "error": {...}}`
/// inside an HTTP 200 response. Non-JSON bodies (PDF downloads) pass
/// through untouched.
fn check_envelope(body: &[u8]) -> Result<(), ApiError> {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return Ok(());
    };
    let Some(fields) = value.as_object() else {
        return Ok(());
    };
    if fields.get("success").and_then(Value::as_bool) == Some(false) {
        let error = fields.get("error");
        let kind = error
            .and_then(|e| e.get("type"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_owned();
        let info = error
            .and_then(|e| e.get("info"))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        return Err(ApiError::Remote { kind, info });
    }
    Ok(())
}
