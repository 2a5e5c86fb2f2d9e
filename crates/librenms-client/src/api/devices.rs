//! Device endpoints (`/devices`)
//!
//! See: https://docs.librenms.org/API/Devices/

use crate::client::LibreNmsClient;
use crate::error::LibreNmsError;
use crate::models::{
    AddDeviceRequest, Availability, Device, DeviceQueryType, DeviceRef, GraphDescriptor,
    IpAddress, Link, MaintenanceRequest, Outage, SNMP_VERSIONS,
};
use std::net::Ipv4Addr;
use tracing::{debug, info};

impl LibreNmsClient {
    /// List devices matching a filter
    ///
    /// # Arguments
    /// * `query_type` - Listing filter (e.g., `DeviceQueryType::Os`)
    /// * `query` - Filter value, for the filters that take one
    ///
    /// # Returns
    /// * `Ok(Some(Vec<Device>))` - Matching devices (also written to the device cache)
    /// * `Ok(None)` - Nothing matched
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn list_devices_by(
        &self,
        query_type: DeviceQueryType,
        query: Option<&str>,
    ) -> Result<Option<Vec<Device>>, LibreNmsError> {
        debug!("Listing devices with {}={:?}", query_type, query);
        self.resolver.list_by(query_type, query).await
    }

    /// List every device
    pub async fn list_devices(&self) -> Result<Vec<Device>, LibreNmsError> {
        Ok(self
            .list_devices_by(DeviceQueryType::All, None)
            .await?
            .unwrap_or_default())
    }

    /// Get a device by hostname or id
    ///
    /// Served from the device cache when possible, otherwise fetched from
    /// `/devices/{hostname}` and cached.
    ///
    /// # Returns
    /// * `Ok(Some(Device))` - The device if found
    /// * `Ok(None)` - If no device found
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn get_device(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Option<Device>, LibreNmsError> {
        let device = device.into();
        if let Some(cached) = self.device_cache().lookup(&device) {
            return Ok(Some(cached));
        }

        let url = self.url(&format!("/devices/{}", encode_ref(&device)));
        let envelope = match self.transport.get(&url).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let devices = envelope.non_empty_list::<Device>("devices")?;
        self.device_cache().set(devices.as_deref());
        Ok(devices.and_then(|list| list.into_iter().next()))
    }

    /// Find the device whose management address is `ip`
    ///
    /// `ip` may also be an IPv4 address in integer form (`167772161`).
    /// Searches the full device listing, which is cached as a side effect.
    pub async fn device_by_ip(&self, ip: &str) -> Result<Option<Device>, LibreNmsError> {
        let ip = normalize_ip(ip);
        Ok(self
            .list_devices()
            .await?
            .into_iter()
            .find(|d| d.ip.as_deref() == Some(ip.as_str())))
    }

    /// Resolve a device, mapping "not found" to `None`
    pub(crate) async fn find_device(
        &self,
        device: &DeviceRef,
    ) -> Result<Option<Device>, LibreNmsError> {
        self.resolver.find(device).await
    }

    /// Add a device
    ///
    /// The request is validated first: a hostname is required, `snmpver`
    /// must be one of `v1`, `v2c`, `v3`, and ping-only devices
    /// (`snmp_disable`) have their SNMP settings removed.
    ///
    /// # Returns
    /// * `Ok(Some(Vec<Device>))` - The created device record(s)
    /// * `Ok(None)` - The backend accepted the request but returned no record
    /// * `Err(LibreNmsError::InvalidRequest)` - Validation failed, nothing was sent
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn add_device(
        &self,
        request: AddDeviceRequest,
    ) -> Result<Option<Vec<Device>>, LibreNmsError> {
        let request = normalize_add_request(request)?;
        let body = serde_json::to_value(&request)?;

        let envelope = self.transport.post(&self.url("/devices"), Some(&body)).await?;
        info!("Added device {} to LibreNMS", request.hostname);

        let devices = envelope.non_empty_list::<Device>("devices")?;
        self.device_cache().set(devices.as_deref());
        Ok(devices)
    }

    /// Delete a device
    ///
    /// # Returns
    /// * `Ok(Some(Vec<Device>))` - The deleted device record(s)
    /// * `Ok(None)` - The device does not exist
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn delete_device(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Option<Vec<Device>>, LibreNmsError> {
        let device = device.into();
        let Some(found) = self.find_device(&device).await? else {
            return Ok(None);
        };

        let url = self.url(&format!("/devices/{}", found.device_id));
        let envelope = self.transport.delete(&url).await?;
        self.device_cache().forget(&DeviceRef::Id(found.device_id));
        info!("Deleted device {} ({})", found.hostname, found.device_id);

        envelope.non_empty_list("devices")
    }

    /// Rename a device
    ///
    /// Returns `false` when the device does not exist or the backend did not
    /// answer with HTTP 200.
    pub async fn rename_device(
        &self,
        device: impl Into<DeviceRef>,
        new_name: &str,
    ) -> Result<bool, LibreNmsError> {
        let device = device.into();
        let Some(found) = self.find_device(&device).await? else {
            return Ok(false);
        };

        let url = self.url(&format!(
            "/devices/{}/rename/{}",
            found.device_id,
            urlencoding::encode(new_name)
        ));
        let envelope = self.transport.patch(&url, None).await?;
        // Old hostname must not resolve any more
        self.device_cache().forget(&DeviceRef::Id(found.device_id));

        Ok(envelope.code == 200)
    }

    /// Trigger a discovery run for a device
    pub async fn discover_device(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<bool, LibreNmsError> {
        let device = device.into();
        let Some(found) = self.find_device(&device).await? else {
            return Ok(false);
        };

        let url = self.url(&format!("/devices/{}/discover", found.device_id));
        let envelope = self.transport.get(&url).await?;
        Ok(envelope.code == 200 && envelope.contains("result"))
    }

    /// Put a device into maintenance mode
    pub async fn maintenance_device(
        &self,
        device: impl Into<DeviceRef>,
        request: &MaintenanceRequest,
    ) -> Result<bool, LibreNmsError> {
        let device = device.into();
        let Some(found) = self.find_device(&device).await? else {
            return Ok(false);
        };

        let body = serde_json::to_value(request)?;
        let url = self.url(&format!("/devices/{}/maintenance", found.device_id));
        let envelope = self.transport.post(&url, Some(&body)).await?;
        Ok(envelope.code == 200 && envelope.contains("result"))
    }

    /// True when the device is polled over SNMP
    pub async fn device_has_snmp(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<bool, LibreNmsError> {
        Ok(self
            .find_device(&device.into())
            .await?
            .is_some_and(|d| d.has_snmp()))
    }

    /// Availability percentages of a device
    pub async fn device_availability(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Option<Vec<Availability>>, LibreNmsError> {
        self.device_list_field(device.into(), "availability", "availability")
            .await
    }

    /// Outage history of a device
    pub async fn device_outages(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Option<Vec<Outage>>, LibreNmsError> {
        self.device_list_field(device.into(), "outages", "outages").await
    }

    /// IP addresses configured on a device
    pub async fn device_ip_addresses(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Option<Vec<IpAddress>>, LibreNmsError> {
        self.device_list_field(device.into(), "ip", "addresses").await
    }

    /// CDP/LLDP links discovered on a device
    ///
    /// `None` when the device does not exist or has no links.
    pub async fn device_links(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Option<Vec<Link>>, LibreNmsError> {
        let links: Option<Vec<Link>> = self
            .device_list_field(device.into(), "links", "links")
            .await?;
        Ok(links.filter(|l| !l.is_empty()))
    }

    /// Wireless graphs available for a device
    ///
    /// `None` when the device does not exist or has no wireless sensors.
    pub async fn device_wireless_graphs(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Option<Vec<GraphDescriptor>>, LibreNmsError> {
        let graphs: Option<Vec<GraphDescriptor>> = self
            .device_list_field(device.into(), "wireless", "graphs")
            .await?;
        Ok(graphs.filter(|g| !g.is_empty()))
    }

    /// True when the device reports wireless sensors
    pub async fn device_has_wireless(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<bool, LibreNmsError> {
        Ok(self.device_wireless_graphs(device).await?.is_some())
    }

    /// GET `/devices/{id}/{suffix}` and decode one list key
    async fn device_list_field<T: serde::de::DeserializeOwned>(
        &self,
        device: DeviceRef,
        suffix: &str,
        key: &str,
    ) -> Result<Option<Vec<T>>, LibreNmsError> {
        let Some(found) = self.find_device(&device).await? else {
            return Ok(None);
        };

        let url = self.url(&format!("/devices/{}/{}", found.device_id, suffix));
        let envelope = self.transport.get(&url).await?;
        envelope.field(key)
    }
}

/// Path segment for a device reference
pub(crate) fn encode_ref(device: &DeviceRef) -> String {
    urlencoding::encode(&device.query_value()).into_owned()
}

/// Dotted form of an address that may be given as a 32-bit integer
pub(crate) fn normalize_ip(value: &str) -> String {
    let value = value.trim();
    if value.contains('.') || value.contains(':') {
        return value.to_string();
    }
    value
        .parse::<u32>()
        .map_or_else(|_| value.to_string(), |n| Ipv4Addr::from(n).to_string())
}

/// Validate an add-device request and drop settings that do not apply
pub(crate) fn normalize_add_request(
    mut request: AddDeviceRequest,
) -> Result<AddDeviceRequest, LibreNmsError> {
    if request.hostname.trim().is_empty() {
        return Err(LibreNmsError::InvalidRequest(
            "Missing required Hostname/IP.".to_string(),
        ));
    }

    if let Some(version) = request.snmpver.as_deref() {
        if !SNMP_VERSIONS.contains(&version) {
            return Err(LibreNmsError::InvalidRequest(format!(
                "Invalid snmp version '{version}', expected one of [{}].",
                SNMP_VERSIONS.join(",")
            )));
        }
    }

    if request.snmp_disable == Some(true) {
        request.port = None;
        request.transport = None;
        request.snmpver = None;
        request.community = None;
        request.authlevel = None;
        request.authname = None;
        request.authpass = None;
        request.authalgo = None;
        request.cryptopass = None;
        request.cryptoalgo = None;
        request.port_association_mode = None;
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_requires_hostname() {
        let err = normalize_add_request(AddDeviceRequest::default()).expect_err("no hostname");
        assert!(matches!(err, LibreNmsError::InvalidRequest(_)));
    }

    #[test]
    fn test_add_request_rejects_unknown_snmp_version() {
        let mut request = AddDeviceRequest::snmp_v2c("sw1", "public");
        request.snmpver = Some("v4".to_string());
        let err = normalize_add_request(request).expect_err("bad version");
        assert!(err.to_string().contains("Invalid snmp version"));

        for version in SNMP_VERSIONS {
            let mut request = AddDeviceRequest::snmp_v2c("sw1", "public");
            request.snmpver = Some(version.to_string());
            assert!(normalize_add_request(request).is_ok());
        }
    }

    #[test]
    fn test_icmp_only_drops_snmp_settings() {
        let mut request = AddDeviceRequest::icmp_only("pinger");
        request.community = Some("public".to_string());
        request.snmpver = Some("v2c".to_string());
        request.port = Some(161);
        request.display = Some("Ping target".to_string());

        let request = normalize_add_request(request).expect("valid");
        assert_eq!(request.community, None);
        assert_eq!(request.snmpver, None);
        assert_eq!(request.port, None);
        assert_eq!(request.display.as_deref(), Some("Ping target"));
        assert_eq!(request.snmp_disable, Some(true));
    }

    #[test]
    fn test_normalize_ip_accepts_integer_form() {
        assert_eq!(normalize_ip("167772161"), "10.0.0.1");
        assert_eq!(normalize_ip(" 10.0.0.1 "), "10.0.0.1");
        assert_eq!(normalize_ip("2001:db8::1"), "2001:db8::1");
        assert_eq!(normalize_ip("not-an-ip"), "not-an-ip");
    }

    #[test]
    fn test_encode_ref_escapes_path_characters() {
        assert_eq!(encode_ref(&DeviceRef::from("sw 1/a")), "sw%201%2Fa");
        assert_eq!(encode_ref(&DeviceRef::Id(42)), "42");
    }
}
