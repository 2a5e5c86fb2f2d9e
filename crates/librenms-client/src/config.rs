//! Client configuration
//!
//! Base URL and token are fixed for the lifetime of a client. Everything else
//! has a default matching what a LibreNMS installation with a self-signed
//! certificate needs.

use crate::error::LibreNmsError;
use std::env;
use std::time::Duration;
use tracing::debug;

/// Path prefix of the v0 REST API
pub const API_PATH: &str = "/api/v0";

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the LibreNMS base URL
pub const ENV_URL: &str = "LIBRENMS_URL";
/// Environment variable holding the API token
pub const ENV_TOKEN: &str = "LIBRENMS_TOKEN";
/// Optional connect timeout override, in seconds
pub const ENV_CONNECT_TIMEOUT: &str = "LIBRENMS_CONNECT_TIMEOUT_SECS";
/// Optional switch to enable certificate verification (`true`/`1`)
pub const ENV_VERIFY_TLS: &str = "LIBRENMS_VERIFY_TLS";

/// Connection settings for a LibreNMS client
#[derive(Clone)]
pub struct ClientConfig {
    /// LibreNMS base URL (e.g., "https://librenms.example.com")
    pub base_url: String,
    /// API token sent as `X-Auth-Token`
    pub token: String,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
    /// Skip certificate verification
    pub accept_invalid_certs: bool,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with default timeout, TLS and user-agent settings
    ///
    /// # Arguments
    /// * `base_url` - LibreNMS base URL, with or without the `/api/v0` suffix
    /// * `token` - API token for authentication
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            accept_invalid_certs: true,
            user_agent: format!("librenms-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Load configuration from `LIBRENMS_*` environment variables
    ///
    /// `LIBRENMS_URL` and `LIBRENMS_TOKEN` are required.
    pub fn from_env() -> Result<Self, LibreNmsError> {
        let base_url = env::var(ENV_URL).map_err(|_| {
            LibreNmsError::InvalidConfig(format!("{ENV_URL} environment variable is required"))
        })?;
        let token = env::var(ENV_TOKEN).map_err(|_| {
            LibreNmsError::InvalidConfig(format!("{ENV_TOKEN} environment variable is required"))
        })?;

        let mut config = Self::new(base_url, token);

        if let Ok(raw) = env::var(ENV_CONNECT_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                LibreNmsError::InvalidConfig(format!(
                    "{ENV_CONNECT_TIMEOUT} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }

        if let Ok(raw) = env::var(ENV_VERIFY_TLS) {
            let verify = matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
            config = config.with_tls_verification(verify);
        }

        debug!("Loaded LibreNMS configuration for {}", config.base_url);
        config.validate()?;
        Ok(config)
    }

    /// Override the connect timeout
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Enable or disable certificate verification
    #[must_use]
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.accept_invalid_certs = !verify;
        self
    }

    /// Override the `User-Agent` header
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check that the required fields are present and usable
    pub fn validate(&self) -> Result<(), LibreNmsError> {
        if self.base_url.trim().is_empty() {
            return Err(LibreNmsError::InvalidConfig("base URL is required".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(LibreNmsError::InvalidConfig("API token is required".to_string()));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            LibreNmsError::InvalidConfig(format!("invalid base URL '{}': {e}", self.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LibreNmsError::InvalidConfig(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(())
    }

    /// Base of every API request: the configured URL with exactly one `/api/v0` suffix
    #[must_use]
    pub fn api_base(&self) -> String {
        let stripped = self.base_url.replace(API_PATH, "");
        format!("{}{}", stripped.trim_end_matches('/'), API_PATH)
    }
}
