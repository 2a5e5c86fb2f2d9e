//! LibreNMS API client
//!
//! Implements the LibreNMS v0 REST API client. Resource operations live in
//! the `api` module as inherent methods; this file owns construction and the
//! shared pieces every resource uses.
//! Based on LibreNMS API structure: /api/v0/devices, /api/v0/ports, ...

use crate::cache::{Cache, DeviceCache};
use crate::common::{HttpBackend, Transport};
use crate::config::ClientConfig;
use crate::error::LibreNmsError;
use crate::models::{Device, DeviceRef, Sensor};
use crate::resolver::DeviceResolver;
use std::sync::Arc;
use tracing::debug;

/// LibreNMS API client
#[derive(Debug, Clone)]
pub struct LibreNmsClient {
    pub(crate) transport: Arc<Transport>,
    pub(crate) resolver: Arc<DeviceResolver>,
    // Whole-install sensor listing, refetched only when forced
    pub(crate) sensors: Arc<Cache<Vec<Sensor>>>,
}

impl LibreNmsClient {
    /// Create a new LibreNMS client with default settings
    ///
    /// # Arguments
    /// * `base_url` - LibreNMS base URL (e.g., "https://librenms.example.com")
    /// * `token` - API token for authentication
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, LibreNmsError> {
        Self::from_config(&ClientConfig::new(base_url, token))
    }

    /// Create a client from an explicit configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, LibreNmsError> {
        let transport = Transport::new(config)?;
        debug!("LibreNMS client for {}", transport.api_base());
        Ok(Self::with_parts(Arc::new(transport), Arc::new(DeviceCache::new())))
    }

    /// Create a client over a custom HTTP backend
    pub fn with_backend(
        config: &ClientConfig,
        backend: Arc<dyn HttpBackend>,
    ) -> Result<Self, LibreNmsError> {
        config.validate()?;
        let transport = Transport::with_backend(config, backend);
        Ok(Self::with_parts(Arc::new(transport), Arc::new(DeviceCache::new())))
    }

    /// Create a client from a transport and a device cache shared with other clients
    #[must_use]
    pub fn with_parts(transport: Arc<Transport>, cache: Arc<DeviceCache>) -> Self {
        let resolver = Arc::new(DeviceResolver::new(Arc::clone(&transport), cache));
        Self {
            transport,
            resolver,
            sensors: Arc::new(Cache::new()),
        }
    }

    /// Get the API base URL (`<base>/api/v0`)
    pub fn base_url(&self) -> &str {
        self.transport.api_base()
    }

    /// Request layer shared by all resources
    #[must_use]
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// Device cache shared by all resources of this client
    #[must_use]
    pub fn device_cache(&self) -> &Arc<DeviceCache> {
        self.resolver.cache()
    }

    /// Resolve a hostname or id to a device record
    ///
    /// Cache first, then a filtered device listing.
    ///
    /// # Returns
    /// * `Ok(Device)` - The device record
    /// * `Err(LibreNmsError::DeviceNotFound)` - No device matched
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn resolve_device(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Device, LibreNmsError> {
        self.resolver.resolve(&device.into()).await
    }

    /// Full URL for an API path
    pub(crate) fn url(&self, part: &str) -> String {
        self.transport.api_url(part)
    }
}
