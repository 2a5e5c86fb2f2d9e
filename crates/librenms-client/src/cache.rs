//! In-memory response caches
//!
//! [`Cache`] is a plain string-keyed store. [`DeviceCache`] layers the
//! device lookups on top of it: one sub-map from device id to record and one
//! from hostname to device id, kept apart by key prefix. Entries never
//! expire; they live until deleted or until the cache is dropped.

use crate::models::{Device, DeviceQueryType, DeviceRef};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::trace;

const DEVICE_ID_PREFIX: &str = "device_id:";
const HOSTNAME_PREFIX: &str = "hostname:";

/// Thread-safe string-keyed store
#[derive(Debug)]
pub struct Cache<V> {
    entries: RwLock<HashMap<String, V>>,
}

impl<V> Default for Cache<V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> Cache<V> {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the value stored under `key`
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value);
    }

    /// Remove `key`, returning the value it held
    pub fn delete(&self, key: &str) -> Option<V> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    /// True when `key` is present
    pub fn exists(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when the cache holds nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
enum DeviceEntry {
    Record(Device),
    Id(u64),
}

/// Device lookups by id and by hostname
///
/// Construct one per client session and share it through `Arc`.
#[derive(Debug, Default)]
pub struct DeviceCache {
    store: Cache<DeviceEntry>,
}

impl DeviceCache {
    /// Create an empty device cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a device by query type and value
    ///
    /// Only [`DeviceQueryType::Hostname`] and [`DeviceQueryType::DeviceId`]
    /// are served; any other type, or an absent value, returns `None`
    /// without touching storage. A hostname lookup needs both the
    /// hostname → id and the id → record entries.
    pub fn get(&self, query_type: DeviceQueryType, query: Option<&str>) -> Option<Device> {
        let query = query?;
        let found = match query_type {
            DeviceQueryType::Hostname => self
                .id_for_hostname(query)
                .and_then(|id| self.record(&id.to_string())),
            DeviceQueryType::DeviceId => self.record(query),
            _ => return None,
        };
        trace!(
            "Device cache {} for {}={}",
            if found.is_some() { "hit" } else { "miss" },
            query_type,
            query
        );
        found
    }

    /// Look up a device by reference
    pub fn lookup(&self, device: &DeviceRef) -> Option<Device> {
        self.get(device.query_type(), Some(&device.query_value()))
    }

    /// Record every device of a listing
    ///
    /// `None` (a listing that produced nothing) leaves the cache untouched.
    pub fn set(&self, devices: Option<&[Device]>) {
        let Some(devices) = devices else {
            return;
        };
        for device in devices {
            // A renamed device must not stay reachable under its old hostname
            if let Some(previous) = self.record(&device.device_id.to_string()) {
                if previous.hostname != device.hostname {
                    self.store
                        .delete(&format!("{HOSTNAME_PREFIX}{}", previous.hostname));
                }
            }
            self.store.set(
                format!("{DEVICE_ID_PREFIX}{}", device.device_id),
                DeviceEntry::Record(device.clone()),
            );
            self.store.set(
                format!("{HOSTNAME_PREFIX}{}", device.hostname),
                DeviceEntry::Id(device.device_id),
            );
        }
        trace!("Cached {} device(s)", devices.len());
    }

    /// Drop both entries of a device, if it is cached
    ///
    /// Returns the evicted record.
    pub fn forget(&self, device: &DeviceRef) -> Option<Device> {
        let record = self.lookup(device)?;
        self.store
            .delete(&format!("{DEVICE_ID_PREFIX}{}", record.device_id));
        self.store
            .delete(&format!("{HOSTNAME_PREFIX}{}", record.hostname));
        Some(record)
    }

    /// Remove every cached device
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Number of cached device records
    pub fn len(&self) -> usize {
        self.store
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|entry| matches!(entry, DeviceEntry::Record(_)))
            .count()
    }

    /// True when no device is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn id_for_hostname(&self, hostname: &str) -> Option<u64> {
        match self.store.get(&format!("{HOSTNAME_PREFIX}{hostname}"))? {
            DeviceEntry::Id(id) => Some(id),
            DeviceEntry::Record(_) => None,
        }
    }

    fn record(&self, device_id: &str) -> Option<Device> {
        match self.store.get(&format!("{DEVICE_ID_PREFIX}{device_id}"))? {
            DeviceEntry::Record(device) => Some(device),
            DeviceEntry::Id(_) => None,
        }
    }
}
