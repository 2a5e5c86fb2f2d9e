//! Common utilities for LibreNMS API client
//!
//! Provides the shared request/response layer used by every resource:
//! URL joining, the fixed header set, verb dispatch and envelope parsing.

pub mod backend;
pub mod envelope;
pub mod query;

pub use backend::{HttpBackend, HttpRequest, Method, RawResponse, ReqwestBackend};
pub use envelope::{CONTENT_TYPE_JSON, CONTENT_TYPE_PNG, Headers, Image, ResponseEnvelope};

use crate::config::ClientConfig;
use crate::error::LibreNmsError;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Header carrying the API token
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Join a base URL and a path with exactly one slash
///
/// Trailing slashes are stripped from `base` and leading slashes from `part`.
#[must_use]
pub fn build_url(base: &str, part: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        part.trim_start_matches('/')
    )
}

/// Authenticated request executor bound to one LibreNMS endpoint
///
/// Immutable once built; clone the `Arc` to share it between callers.
pub struct Transport {
    backend: Arc<dyn HttpBackend>,
    api_base: String,
    token: String,
    user_agent: String,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Create a transport backed by reqwest
    pub fn new(config: &ClientConfig) -> Result<Self, LibreNmsError> {
        config.validate()?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Create a transport over a caller-supplied backend
    #[must_use]
    pub fn with_backend(config: &ClientConfig, backend: Arc<dyn HttpBackend>) -> Self {
        Self {
            backend,
            api_base: config.api_base(),
            token: config.token.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Base of every request URL (`<configured base>/api/v0`)
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Full URL for an API path
    #[must_use]
    pub fn api_url(&self, part: &str) -> String {
        build_url(&self.api_base, part)
    }

    /// Headers sent with every request
    fn request_headers(&self) -> Vec<(String, String)> {
        vec![
            (AUTH_HEADER.to_string(), self.token.clone()),
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Accept".to_string(), "*/*".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<ResponseEnvelope, LibreNmsError> {
        self.send(Method::Get, url, None).await
    }

    /// Make a POST request
    pub async fn post(
        &self,
        url: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<ResponseEnvelope, LibreNmsError> {
        self.send(Method::Post, url, data).await
    }

    /// Make a PUT request
    pub async fn put(
        &self,
        url: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<ResponseEnvelope, LibreNmsError> {
        self.send(Method::Put, url, data).await
    }

    /// Make a PATCH request
    pub async fn patch(
        &self,
        url: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<ResponseEnvelope, LibreNmsError> {
        self.send(Method::Patch, url, data).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str) -> Result<ResponseEnvelope, LibreNmsError> {
        self.send(Method::Delete, url, None).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        data: Option<&serde_json::Value>,
    ) -> Result<ResponseEnvelope, LibreNmsError> {
        let body = data.map(serde_json::to_vec).transpose()?;
        debug!("{} {}", method, url);

        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers: self.request_headers(),
            body,
        };

        let raw = self.backend.execute(request).await?;
        ResponseEnvelope::from_raw(raw, url)
    }
}
