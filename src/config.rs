//! Client configuration: API credentials and endpoint settings.
//!
//! A [`Config`] is constructed once at startup and passed explicitly to
//! every client; nothing in this crate reads ambient process state.
//!
//! Configuration can be built in code or loaded from a TOML file with an
//! `[api]` section:
//!
//! ```toml
//! [api]
//! access_key = "your_access_key"
//! business_id = 1234
//! language = "en"
//! sandbox = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Default document and notification language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default sandbox flag. Fresh configurations start in sandbox mode.
pub const DEFAULT_SANDBOX: bool = true;

/// Default API base URL all endpoint paths are joined onto.
pub const DEFAULT_API_BASE: &str = "https://api.eversign.com/api";

/// Default timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API credentials and endpoint settings.
///
/// Read-only after construction. The client injects `access_key`,
/// `business_id`, and `language` into every request it builds;
/// document creation additionally carries the sandbox flag in its body.
#[derive(Debug, Clone)]
pub struct Config {
    /// Access key issued in the API dashboard.
    pub access_key: String,

    /// Numeric identifier of the business the key belongs to.
    pub business_id: i64,

    /// Language for documents and notification emails.
    pub language: String,

    /// When set, the remote service processes requests without legal
    /// effect.
    pub sandbox: bool,

    /// Base URL endpoint paths are joined onto.
    pub api_base: Url,

    /// Timeout for every outbound request.
    pub timeout: Duration,
}

impl Config {
    /// Creates a configuration with default language, sandbox mode,
    /// API base, and timeout.
    #[must_use]
    pub fn new(access_key: impl Into<String>, business_id: i64) -> Self {
        Self {
            access_key: access_key.into(),
            business_id,
            language: DEFAULT_LANGUAGE.to_owned(),
            sandbox: DEFAULT_SANDBOX,
            api_base: default_api_base(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the document language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Enables or disables sandbox mode.
    #[must_use]
    pub const fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wire encoding of the sandbox flag (`1` or `0`).
    #[must_use]
    pub const fn sandbox_flag(&self) -> u8 {
        if self.sandbox { 1 } else { 0 }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a required
    /// field is missing, or the configured base URL is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed: TomlConfig = toml::from_str(&content)?;
        parsed.validate()
    }
}

/// Parses the default API base URL.
fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default API base URL is valid")
}

/// Root configuration structure from TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    /// API credential section
    #[serde(default)]
    api: ApiSection,
}

/// `[api]` section of the configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiSection {
    /// Access key issued in the API dashboard
    access_key: Option<String>,

    /// Numeric business identifier
    business_id: Option<i64>,

    /// Document language (default: "en")
    language: Option<String>,

    /// Sandbox mode (default: true)
    sandbox: Option<bool>,

    /// API base URL override
    api_base: Option<String>,

    /// Request timeout in seconds (default: 30)
    timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Validates the parsed file and fills in defaults.
    fn validate(self) -> Result<Config, ConfigError> {
        let api = self.api;

        let access_key = api.access_key.ok_or(ConfigError::MissingRequired {
            field: "api.access_key",
            hint: "Set access_key in the [api] section.",
        })?;

        let business_id = api.business_id.ok_or(ConfigError::MissingRequired {
            field: "api.business_id",
            hint: "Set business_id in the [api] section.",
        })?;

        let api_base = match api.api_base {
            Some(raw) => Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
                url: raw,
                reason: e.to_string(),
            })?,
            None => default_api_base(),
        };

        Ok(Config {
            access_key,
            business_id,
            language: api.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned()),
            sandbox: api.sandbox.unwrap_or(DEFAULT_SANDBOX),
            api_base,
            timeout: api.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs),
        })
    }
}

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field that must be present in the config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid base URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },
}
