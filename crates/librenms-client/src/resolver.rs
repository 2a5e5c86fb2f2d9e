//! Device resolution
//!
//! Every device-scoped operation starts by turning a hostname or id into a
//! device record. The [`DeviceResolver`] answers from the [`DeviceCache`]
//! when it can and otherwise issues one filtered listing call, caching what
//! comes back.

use crate::cache::DeviceCache;
use crate::common::Transport;
use crate::common::query::with_query;
use crate::error::LibreNmsError;
use crate::models::{Device, DeviceQueryType, DeviceRef};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Cache-first device lookup over a [`Transport`]
#[derive(Debug)]
pub struct DeviceResolver {
    transport: Arc<Transport>,
    cache: Arc<DeviceCache>,
    // Serialises miss -> fetch -> populate
    populate: Mutex<()>,
}

impl DeviceResolver {
    /// Create a resolver sharing the given transport and cache
    #[must_use]
    pub fn new(transport: Arc<Transport>, cache: Arc<DeviceCache>) -> Self {
        Self {
            transport,
            cache,
            populate: Mutex::new(()),
        }
    }

    /// Cache backing this resolver
    #[must_use]
    pub fn cache(&self) -> &Arc<DeviceCache> {
        &self.cache
    }

    /// List devices matching a filter
    ///
    /// Returns `None` when the response has no `devices` key or the list is
    /// empty. Any devices returned are written to the cache.
    pub async fn list_by(
        &self,
        query_type: DeviceQueryType,
        query: Option<&str>,
    ) -> Result<Option<Vec<Device>>, LibreNmsError> {
        let url = with_query(
            self.transport.api_url("/devices"),
            &[("type", Some(query_type.as_str())), ("query", query)],
        );
        let envelope = self.transport.get(&url).await?;
        let devices = envelope.non_empty_list::<Device>("devices")?;
        self.cache.set(devices.as_deref());
        Ok(devices)
    }

    /// Resolve a hostname or id to its device record, or fail
    ///
    /// Fails with [`LibreNmsError::DeviceNotFound`] when neither the cache nor
    /// the listing knows the device. Transport errors propagate unchanged.
    pub async fn resolve(&self, device: &DeviceRef) -> Result<Device, LibreNmsError> {
        if let Some(found) = self.cache.lookup(device) {
            return Ok(found);
        }

        let _guard = self.populate.lock().await;

        // Another caller may have populated the entry while we waited
        if let Some(found) = self.cache.lookup(device) {
            return Ok(found);
        }

        debug!("Resolving device {} via listing", device);
        let query = device.query_value();
        let devices = self.list_by(device.query_type(), Some(&query)).await?;

        // The hostname filter is a substring search, so skip near misses
        devices
            .and_then(|list| list.into_iter().find(|d| device.matches(d)))
            .ok_or_else(|| LibreNmsError::DeviceNotFound(device.to_string()))
    }

    /// Resolve a device, mapping "not found" to `None`
    pub async fn find(&self, device: &DeviceRef) -> Result<Option<Device>, LibreNmsError> {
        match self.resolve(device).await {
            Ok(found) => Ok(Some(found)),
            Err(LibreNmsError::DeviceNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
