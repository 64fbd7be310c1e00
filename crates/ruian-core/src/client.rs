//! HTTP transport for the RUIAN API
//!
//! This module provides the low-level GET layer: it builds query URLs
//! against the fixed API base, sends requests with fixed headers and
//! timeout, and returns the raw status code and body. Interpreting the
//! status code is a separate pure function, [`decode_response`], so the
//! status-to-error mapping stays testable without any I/O.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::error::{Result, RuianError};

/// Base URL of the public RUIAN API
pub const RUIAN_BASE_URL: &str = "https://ruian.fnx.io/api/v1/ruian";

/// User-Agent sent with every request
const USER_AGENT: &str = concat!("ruian-core/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default TTL for cached responses (24 hours)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

/// Hourly request quota enforced by the API, reported on 429 errors
pub const RATE_LIMIT_PER_HOUR: u32 = 1000;

/// Query parameters as ordered key/value pairs
pub(crate) type Params = Vec<(String, String)>;

/// Configuration for the RUIAN client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key appended to every request (required, secret)
    pub api_key: String,
    /// API base URL; override to point at a mock endpoint in tests
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Whether successful responses are cached (default: true)
    pub cache_enabled: bool,
    /// TTL for cached responses in seconds (default: 86400)
    pub cache_ttl_secs: u64,
}

impl ClientConfig {
    /// Create a configuration with defaults for the given API key.
    ///
    /// # Example
    /// ```
    /// use ruian_core::ClientConfig;
    ///
    /// let config = ClientConfig::new("my-api-key");
    /// assert_eq!(config.timeout_secs, 30);
    /// ```
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: RUIAN_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_enabled: true,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Low-level HTTP transport for the RUIAN API
///
/// Sends GETs with `Accept: application/json`, a fixed User-Agent and
/// timeout, and TLS verification at reqwest defaults. Non-2xx statuses
/// are not raised here; the status code is returned to the caller.
pub struct RuianHttp {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RuianHttp {
    /// Create a transport from the given configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Issue a GET against an API endpoint.
    ///
    /// The API key is appended as the `apiKey` query parameter.
    ///
    /// # Arguments
    /// * `endpoint` - Relative endpoint path (e.g., "validate", "build/regions")
    /// * `params` - Query parameters, percent-encoded by reqwest
    ///
    /// # Returns
    /// The raw `(status, body)` pair
    ///
    /// # Errors
    /// `RuianError::Connection` on transport failure (DNS, refused
    /// connection, TLS, timeout)
    pub async fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<(u16, String)> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(endpoint, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Map a raw `(status, body)` pair to a decoded JSON object or a typed error.
///
/// | Status | Outcome |
/// |---|---|
/// | 200 | body parsed as a JSON object |
/// | 401 | [`RuianError::Auth`] |
/// | 422 | `Api("missing required parameters")` |
/// | 429 | [`RuianError::RateLimited`] with the documented quota |
/// | ≥500 | `Api("server error")` |
/// | other | `Api("unexpected status: N")` |
///
/// A 200 body that fails to parse as a JSON object yields an `Api` error
/// wrapping the parser's message.
pub fn decode_response(status: u16, body: &str) -> Result<Map<String, Value>> {
    match status {
        200 => serde_json::from_str::<Map<String, Value>>(body)
            .map_err(|e| RuianError::invalid_json(&e)),
        401 => Err(RuianError::Auth),
        422 => Err(RuianError::missing_parameters()),
        429 => Err(RuianError::RateLimited {
            limit: RATE_LIMIT_PER_HOUR,
        }),
        s if s >= 500 => Err(RuianError::server_error()),
        s => Err(RuianError::unexpected_status(s)),
    }
}
