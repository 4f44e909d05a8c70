//! Request descriptor assembly with location-aware parameter placement.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::error::RequestError;

/// Sentinel key that makes a [`ParamLocation::Body`] parameter replace
/// the entire request body instead of adding a multipart field.
pub const BODY_SENTINEL: &str = "body";

/// Where a parameter lands on the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Query-string pair. Duplicate keys accumulate in call order.
    Query,
    /// Request header. Later writes overwrite earlier ones.
    Headers,
    /// JSON body. The [`BODY_SENTINEL`] key replaces the whole body;
    /// any other key becomes a JSON-encoded multipart field.
    Body,
    /// Form-encoded body field. Later writes overwrite earlier ones.
    Form,
    /// Multipart file attachment.
    File,
}

/// A single named part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    /// Part name
    pub name: String,
    /// Part content
    pub content: PartContent,
}

/// Content of a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartContent {
    /// JSON-encoded field, sent with `content-type: application/json`.
    JsonField(serde_json::Value),
    /// File read from disk at send time.
    FilePath(PathBuf),
    /// In-memory file contents.
    FileBytes {
        /// File name reported to the server
        file_name: String,
        /// Raw file contents
        bytes: Vec<u8>,
    },
}

/// Request body accumulated by the builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// A complete JSON payload.
    Json(serde_json::Value),
    /// Form-encoded key/value fields.
    Form(BTreeMap<String, String>),
    /// Multipart parts (JSON fields and file attachments).
    Multipart(Vec<MultipartPart>),
}

impl RequestBody {
    /// Short name of the body kind, used in conflict errors.
    const fn kind(&self) -> &'static str {
        match self {
            Self::None => "empty",
            Self::Json(_) => "json",
            Self::Form(_) => "form",
            Self::Multipart(_) => "multipart",
        }
    }
}

/// Incremental builder for an API request.
///
/// Method and path follow set-once semantics: the first write wins and
/// later writes are silent no-ops rather than errors. Parameters are
/// routed to their location by [`RequestBuilder::add_param`]; the
/// terminal [`RequestBuilder::build`] step joins the path onto the API
/// base URL and yields the wire-level [`HttpRequest`] handed to the
/// transport.
///
/// A builder is owned by the single call chain constructing one request
/// and is consumed when built.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    method: Option<http::Method>,
    path: Option<String>,
    query: Vec<(String, String)>,
    headers: http::HeaderMap,
    body: RequestBody,
}

impl RequestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method. No-op if a method was already set.
    pub fn set_method(&mut self, method: http::Method) -> &mut Self {
        if self.method.is_none() {
            self.method = Some(method);
        }
        self
    }

    /// Sets the request path. No-op if a path was already set.
    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        if self.path.is_none() {
            self.path = Some(path.into());
        }
        self
    }

    /// Returns the HTTP method, if set.
    #[must_use]
    pub const fn method(&self) -> Option<&http::Method> {
        self.method.as_ref()
    }

    /// Returns the request path, if set.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the accumulated query pairs in call order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the accumulated headers.
    #[must_use]
    pub const fn headers(&self) -> &http::HeaderMap {
        &self.headers
    }

    /// Returns the accumulated body.
    #[must_use]
    pub const fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Adds a parameter at the given location.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the header syntax is invalid, a
    /// file parameter is not a path string, or the parameter targets a
    /// body kind incompatible with the body already accumulated. All of
    /// these are programming errors in the calling code.
    pub fn add_param(
        &mut self,
        location: ParamLocation,
        key: &str,
        value: impl Into<serde_json::Value>,
    ) -> Result<&mut Self, RequestError> {
        let value = value.into();
        match location {
            ParamLocation::Query => {
                self.query.push((key.to_owned(), scalar_to_string(&value)));
            }
            ParamLocation::Headers => {
                let name =
                    key.parse::<http::HeaderName>()
                        .map_err(|e| RequestError::InvalidHeader {
                            name: key.to_owned(),
                            reason: e.to_string(),
                        })?;
                let header_value = http::HeaderValue::from_str(&scalar_to_string(&value))
                    .map_err(|e| RequestError::InvalidHeader {
                        name: key.to_owned(),
                        reason: e.to_string(),
                    })?;
                self.headers.insert(name, header_value);
            }
            ParamLocation::Body if key == BODY_SENTINEL => {
                self.body = RequestBody::Json(value);
            }
            ParamLocation::Body => {
                self.multipart_parts("json field")?.push(MultipartPart {
                    name: key.to_owned(),
                    content: PartContent::JsonField(value),
                });
            }
            ParamLocation::File => {
                let serde_json::Value::String(path) = value else {
                    return Err(RequestError::InvalidFileParam {
                        key: key.to_owned(),
                    });
                };
                self.multipart_parts("file")?.push(MultipartPart {
                    name: key.to_owned(),
                    content: PartContent::FilePath(PathBuf::from(path)),
                });
            }
            ParamLocation::Form => {
                self.form_fields()?
                    .insert(key.to_owned(), scalar_to_string(&value));
            }
        }
        Ok(self)
    }

    /// Attaches an in-memory file as a multipart part.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::BodyConflict`] when the body already
    /// holds non-multipart content.
    pub fn add_file_bytes(
        &mut self,
        key: &str,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<&mut Self, RequestError> {
        self.multipart_parts("file")?.push(MultipartPart {
            name: key.to_owned(),
            content: PartContent::FileBytes {
                file_name: file_name.into(),
                bytes,
            },
        });
        Ok(self)
    }

    /// Routes supplied optional parameters through [`Self::add_param`].
    ///
    /// Each supplied `(key, value)` pair is looked up in `table`; pairs
    /// whose key is absent from the table are silently dropped so newer
    /// API fields can be passed through older clients without error.
    /// Every supplied pair is processed exactly once.
    ///
    /// # Errors
    ///
    /// Propagates [`RequestError`] from parameter placement.
    pub fn add_optional_params(
        &mut self,
        table: &[(&str, ParamLocation)],
        supplied: impl IntoIterator<Item = (String, serde_json::Value)>,
    ) -> Result<&mut Self, RequestError> {
        for (key, value) in supplied {
            if let Some((_, location)) = table.iter().find(|(name, _)| *name == key) {
                self.add_param(*location, &key, value)?;
            }
        }
        Ok(self)
    }

    /// Builds the wire-level request by joining the path onto `base`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingMethod`] or
    /// [`RequestError::MissingPath`] for an incomplete descriptor, and
    /// [`RequestError::InvalidPath`] when the joined URL does not parse.
    pub fn build(self, base: &url::Url) -> Result<HttpRequest, RequestError> {
        let method = self.method.ok_or(RequestError::MissingMethod)?;
        let path = self.path.ok_or(RequestError::MissingPath)?;
        let url = join_path(base, &path)?;

        Ok(HttpRequest {
            method,
            url,
            query: self.query,
            headers: self.headers,
            body: self.body,
        })
    }

    /// Returns the multipart part list, initializing an empty body.
    fn multipart_parts(
        &mut self,
        requested: &'static str,
    ) -> Result<&mut Vec<MultipartPart>, RequestError> {
        if matches!(self.body, RequestBody::None) {
            self.body = RequestBody::Multipart(Vec::new());
        }
        match &mut self.body {
            RequestBody::Multipart(parts) => Ok(parts),
            other => Err(RequestError::BodyConflict {
                existing: other.kind(),
                requested,
            }),
        }
    }

    /// Returns the form field map, initializing an empty body.
    fn form_fields(&mut self) -> Result<&mut BTreeMap<String, String>, RequestError> {
        if matches!(self.body, RequestBody::None) {
            self.body = RequestBody::Form(BTreeMap::new());
        }
        match &mut self.body {
            RequestBody::Form(fields) => Ok(fields),
            other => Err(RequestError::BodyConflict {
                existing: other.kind(),
                requested: "form field",
            }),
        }
    }
}

/// A fully-specified request handed to the [`HttpClient`] transport.
///
/// [`HttpClient`]: super::HttpClient
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL (API base joined with the endpoint path)
    pub url: url::Url,
    /// Query pairs in call order; the transport escapes keys and values
    pub query: Vec<(String, String)>,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Request body
    pub body: RequestBody,
}

/// Appends `path` to `base`, keeping the base's own path segments.
///
/// `Url::join` resolves absolute paths against the host root, which
/// would drop the `/api` prefix of the default base, so the path is
/// concatenated instead.
fn join_path(base: &url::Url, path: &str) -> Result<url::Url, RequestError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url::Url::parse(&joined).map_err(|source| RequestError::InvalidPath {
        path: path.to_owned(),
        source,
    })
}

/// Stringifies a JSON value for a query pair, form field, or header.
///
/// Strings pass through unquoted, booleans use the API's `1`/`0` flag
/// convention, null becomes empty, and structured values are
/// JSON-encoded.
fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(true) => "1".to_owned(),
        serde_json::Value::Bool(false) => "0".to_owned(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
