//! Document models and per-operation option types.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::http::ParamLocation;

/// Filter for listing documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentType {
    /// All documents visible to the business.
    #[default]
    All,
    /// Documents waiting on the caller's own signature.
    MyActionRequired,
    /// Documents waiting on other signers.
    WaitingForOthers,
    /// Fully signed documents.
    Completed,
    /// Unsent drafts.
    Drafts,
    /// Cancelled documents.
    Cancelled,
}

impl DocumentType {
    /// Wire value for the `type` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::MyActionRequired => "my_action_required",
            Self::WaitingForOthers => "waiting_for_others",
            Self::Completed => "completed",
            Self::Drafts => "drafts",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signer on a document.
#[derive(Debug, Clone, Deserialize)]
pub struct Signer {
    /// Signer id unique within the document
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Per-signer URL for embedded signing flows
    #[serde(default)]
    pub embedded_signing_url: Option<String>,
}

/// A document as returned by the API.
///
/// Only the fields the library acts on are modeled; everything else the
/// API sends is kept in [`Document::extra`] so callers can reach fields
/// the client does not know about.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Hash identifying the document in every API call.
    pub document_hash: String,

    /// Document title.
    #[serde(default)]
    pub title: Option<String>,

    /// True once every signer has signed.
    #[serde(default, deserialize_with = "flag")]
    pub is_completed: bool,

    /// True while the document is an unsent draft.
    #[serde(default, deserialize_with = "flag")]
    pub is_draft: bool,

    /// True when the document has been cancelled.
    #[serde(default, deserialize_with = "flag")]
    pub is_cancelled: bool,

    /// Signers attached to the document.
    #[serde(default)]
    pub signers: Vec<Signer>,

    /// Remaining response fields, untyped.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Document {
    /// URL for the first signer that has an embedded signing URL, if any.
    #[must_use]
    pub fn embedded_signing_url(&self) -> Option<&str> {
        self.signers
            .iter()
            .find_map(|s| s.embedded_signing_url.as_deref())
    }
}

/// The API encodes booleans as `1`/`0` in some responses and as JSON
/// booleans in others; accept both.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
        _ => Ok(false),
    }
}

/// Optional parameters for the final-document download endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Append the audit trail to the downloaded PDF.
    pub audit_trail: bool,
    /// Select a single file out of a multi-file document.
    pub document_id: Option<String>,
    /// Ask for a time-limited download URL instead of the file itself.
    pub url_only: bool,
}

impl DownloadOptions {
    /// Mapping from option name to request location for this endpoint.
    pub(crate) const TABLE: &'static [(&'static str, ParamLocation)] = &[
        ("audit_trail", ParamLocation::Query),
        ("document_id", ParamLocation::Query),
        ("url_only", ParamLocation::Query),
    ];

    /// Supplied pairs for [`RequestBuilder::add_optional_params`]; unset
    /// options are omitted entirely.
    ///
    /// [`RequestBuilder::add_optional_params`]: crate::http::RequestBuilder::add_optional_params
    pub(crate) fn supplied(&self) -> Vec<(String, Value)> {
        let mut pairs = Vec::new();
        if self.audit_trail {
            pairs.push(("audit_trail".to_owned(), Value::from(1)));
        }
        if let Some(id) = &self.document_id {
            pairs.push(("document_id".to_owned(), Value::from(id.clone())));
        }
        if self.url_only {
            pairs.push(("url_only".to_owned(), Value::from(1)));
        }
        pairs
    }
}
