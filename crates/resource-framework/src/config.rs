//! # Client Configuration
//!
//! Everything the transport and codec need, gathered in one explicit value that is handed
//! to constructors. Nothing is configured globally.
//!
//! ## Environment Variables
//!
//! [`ClientConfig::from_env`] reads (after loading a `.env` file if one exists):
//!
//! - `BILLING_API_BASE_URL` - required, e.g. `https://subdomain.example.com/v2`
//! - `BILLING_API_TIMEOUT_SECS` - request timeout, default 30
//! - `BILLING_API_USER_AGENT` - default `resource-framework/<version>`
//! - `BILLING_API_AUTHORIZATION` - sent verbatim as the `Authorization` header

use crate::codec::CodecConfig;
use serde::Deserialize;
use url::Url;

pub const ENV_BASE_URL: &str = "BILLING_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "BILLING_API_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "BILLING_API_USER_AGENT";
pub const ENV_AUTHORIZATION: &str = "BILLING_API_AUTHORIZATION";

/// Errors raised while assembling a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
    #[error("invalid header {0}")]
    InvalidHeader(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Settings for [`HttpTransport`](crate::HttpTransport) and [`XmlCodec`](crate::XmlCodec).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Extra headers sent with every request. Opaque to the framework.
    pub default_headers: Vec<(String, String)>,
    pub codec: CodecConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 30,
            user_agent: concat!("resource-framework/", env!("CARGO_PKG_VERSION")).to_string(),
            default_headers: Vec::new(),
            codec: CodecConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case in deployed environments.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` is this over `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(ENV_BASE_URL).ok_or(ConfigError::Missing(ENV_BASE_URL))?;
        let mut config = Self::new(base_url);

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                key: ENV_TIMEOUT_SECS,
                message: format!("{e}"),
            })?;
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = agent;
        }
        if let Some(auth) = lookup(ENV_AUTHORIZATION) {
            config.default_headers.push(("Authorization".into(), auth));
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the base URL is an absolute http(s) URL and the codec markers are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate().map_err(|e| ConfigError::Invalid {
            key: "codec",
            message: e.to_string(),
        })?;
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::Invalid {
            key: ENV_BASE_URL,
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: ENV_BASE_URL,
                message: format!("unsupported scheme {}", url.scheme()),
            });
        }
        Ok(())
    }
}
