//! LibreNmsClient trait for mocking
//!
//! This trait abstracts the LibreNmsClient to enable mocking in unit tests.
//! The concrete LibreNmsClient implements this trait, and tests can use mock implementations.

use crate::client::LibreNmsClient;
use crate::common::Image;
use crate::error::LibreNmsError;
use crate::models::*;

/// Trait for LibreNMS API client operations
///
/// This trait enables mocking of LibreNMS API calls for unit testing.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait LibreNmsClientTrait: Send + Sync {
    /// Get the API base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), LibreNmsError>;

    // System
    async fn system_info(&self) -> Result<Option<SystemInfo>, LibreNmsError>;

    // Devices
    async fn list_devices_by(&self, query_type: DeviceQueryType, query: Option<&str>) -> Result<Option<Vec<Device>>, LibreNmsError>;
    async fn get_device(&self, device: DeviceRef) -> Result<Option<Device>, LibreNmsError>;
    async fn resolve_device(&self, device: DeviceRef) -> Result<Device, LibreNmsError>;
    async fn add_device(&self, request: AddDeviceRequest) -> Result<Option<Vec<Device>>, LibreNmsError>;
    async fn delete_device(&self, device: DeviceRef) -> Result<Option<Vec<Device>>, LibreNmsError>;
    async fn rename_device(&self, device: DeviceRef, new_name: &str) -> Result<bool, LibreNmsError>;
    async fn discover_device(&self, device: DeviceRef) -> Result<bool, LibreNmsError>;
    async fn maintenance_device(&self, device: DeviceRef, request: &MaintenanceRequest) -> Result<bool, LibreNmsError>;
    async fn device_availability(&self, device: DeviceRef) -> Result<Option<Vec<Availability>>, LibreNmsError>;
    async fn device_outages(&self, device: DeviceRef) -> Result<Option<Vec<Outage>>, LibreNmsError>;
    async fn device_ip_addresses(&self, device: DeviceRef) -> Result<Option<Vec<IpAddress>>, LibreNmsError>;
    async fn device_links(&self, device: DeviceRef) -> Result<Option<Vec<Link>>, LibreNmsError>;
    async fn device_by_ip(&self, ip: &str) -> Result<Option<Device>, LibreNmsError>;
    async fn device_wireless_graphs(&self, device: DeviceRef) -> Result<Option<Vec<GraphDescriptor>>, LibreNmsError>;
    async fn device_has_wireless(&self, device: DeviceRef) -> Result<bool, LibreNmsError>;

    // Ports
    async fn device_ports(&self, device: DeviceRef, columns: Option<&str>) -> Result<Option<Vec<Port>>, LibreNmsError>;
    async fn get_port(&self, port_id: u64) -> Result<Option<Port>, LibreNmsError>;
    async fn list_ports(&self) -> Result<Option<Vec<Port>>, LibreNmsError>;

    // Graphs
    async fn device_graph(&self, device: DeviceRef, graph_type: &str) -> Result<Option<Image>, LibreNmsError>;
    async fn device_port_graphs(&self, device: DeviceRef, interfaces: Option<&[&str]>, graph_type: Option<&str>) -> Result<Option<Vec<PortGraph>>, LibreNmsError>;

    // Alerts
    async fn get_alert(&self, id: u64) -> Result<Option<Alert>, LibreNmsError>;
    async fn acknowledge_alert(&self, id: u64) -> Result<bool, LibreNmsError>;
    async fn unmute_alert(&self, id: u64) -> Result<bool, LibreNmsError>;
    async fn list_alerts(&self, filter: &AlertFilter) -> Result<Option<Vec<Alert>>, LibreNmsError>;
    async fn all_alerts(&self) -> Result<Option<Vec<Alert>>, LibreNmsError>;

    // Locations
    async fn add_location(&self, request: &LocationRequest) -> Result<Option<String>, LibreNmsError>;
    async fn get_location(&self, name: &str) -> Result<Option<Location>, LibreNmsError>;
    async fn list_locations(&self) -> Result<Option<Vec<Location>>, LibreNmsError>;
    async fn delete_location(&self, name: &str) -> Result<Option<String>, LibreNmsError>;
    async fn edit_location(&self, name: &str, update: &LocationUpdate) -> Result<bool, LibreNmsError>;

    // Logs
    async fn device_logs(&self, device: DeviceRef, kind: LogKind, query: &LogQuery) -> Result<Option<Vec<LogEntry>>, LibreNmsError>;
    async fn device_alerts(&self, device: DeviceRef) -> Result<Option<Vec<LogEntry>>, LibreNmsError>;
    async fn device_events(&self, device: DeviceRef) -> Result<Option<Vec<LogEntry>>, LibreNmsError>;

    // Sensors
    async fn list_sensors(&self, force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError>;
    async fn device_sensors(&self, device: DeviceRef, force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError>;
    async fn sensors_by_class(&self, class: &str, force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError>;
}

#[async_trait::async_trait]
impl LibreNmsClientTrait for LibreNmsClient {
    fn base_url(&self) -> &str {
        LibreNmsClient::base_url(self)
    }

    async fn validate_token(&self) -> Result<(), LibreNmsError> {
        LibreNmsClient::validate_token(self).await
    }

    async fn system_info(&self) -> Result<Option<SystemInfo>, LibreNmsError> {
        LibreNmsClient::system_info(self).await
    }

    async fn list_devices_by(&self, query_type: DeviceQueryType, query: Option<&str>) -> Result<Option<Vec<Device>>, LibreNmsError> {
        LibreNmsClient::list_devices_by(self, query_type, query).await
    }

    async fn get_device(&self, device: DeviceRef) -> Result<Option<Device>, LibreNmsError> {
        LibreNmsClient::get_device(self, device).await
    }

    async fn resolve_device(&self, device: DeviceRef) -> Result<Device, LibreNmsError> {
        LibreNmsClient::resolve_device(self, device).await
    }

    async fn add_device(&self, request: AddDeviceRequest) -> Result<Option<Vec<Device>>, LibreNmsError> {
        LibreNmsClient::add_device(self, request).await
    }

    async fn delete_device(&self, device: DeviceRef) -> Result<Option<Vec<Device>>, LibreNmsError> {
        LibreNmsClient::delete_device(self, device).await
    }

    async fn rename_device(&self, device: DeviceRef, new_name: &str) -> Result<bool, LibreNmsError> {
        LibreNmsClient::rename_device(self, device, new_name).await
    }

    async fn discover_device(&self, device: DeviceRef) -> Result<bool, LibreNmsError> {
        LibreNmsClient::discover_device(self, device).await
    }

    async fn maintenance_device(&self, device: DeviceRef, request: &MaintenanceRequest) -> Result<bool, LibreNmsError> {
        LibreNmsClient::maintenance_device(self, device, request).await
    }

    async fn device_availability(&self, device: DeviceRef) -> Result<Option<Vec<Availability>>, LibreNmsError> {
        LibreNmsClient::device_availability(self, device).await
    }

    async fn device_outages(&self, device: DeviceRef) -> Result<Option<Vec<Outage>>, LibreNmsError> {
        LibreNmsClient::device_outages(self, device).await
    }

    async fn device_ip_addresses(&self, device: DeviceRef) -> Result<Option<Vec<IpAddress>>, LibreNmsError> {
        LibreNmsClient::device_ip_addresses(self, device).await
    }

    async fn device_links(&self, device: DeviceRef) -> Result<Option<Vec<Link>>, LibreNmsError> {
        LibreNmsClient::device_links(self, device).await
    }

    async fn device_by_ip(&self, ip: &str) -> Result<Option<Device>, LibreNmsError> {
        LibreNmsClient::device_by_ip(self, ip).await
    }

    async fn device_wireless_graphs(&self, device: DeviceRef) -> Result<Option<Vec<GraphDescriptor>>, LibreNmsError> {
        LibreNmsClient::device_wireless_graphs(self, device).await
    }

    async fn device_has_wireless(&self, device: DeviceRef) -> Result<bool, LibreNmsError> {
        LibreNmsClient::device_has_wireless(self, device).await
    }

    async fn device_ports(&self, device: DeviceRef, columns: Option<&str>) -> Result<Option<Vec<Port>>, LibreNmsError> {
        LibreNmsClient::device_ports(self, device, columns).await
    }

    async fn get_port(&self, port_id: u64) -> Result<Option<Port>, LibreNmsError> {
        LibreNmsClient::get_port(self, port_id).await
    }

    async fn list_ports(&self) -> Result<Option<Vec<Port>>, LibreNmsError> {
        LibreNmsClient::list_ports(self).await
    }

    async fn device_graph(&self, device: DeviceRef, graph_type: &str) -> Result<Option<Image>, LibreNmsError> {
        LibreNmsClient::device_graph(self, device, graph_type).await
    }

    async fn device_port_graphs(&self, device: DeviceRef, interfaces: Option<&[&str]>, graph_type: Option<&str>) -> Result<Option<Vec<PortGraph>>, LibreNmsError> {
        LibreNmsClient::device_port_graphs(self, device, interfaces, graph_type).await
    }

    async fn get_alert(&self, id: u64) -> Result<Option<Alert>, LibreNmsError> {
        LibreNmsClient::get_alert(self, id).await
    }

    async fn acknowledge_alert(&self, id: u64) -> Result<bool, LibreNmsError> {
        LibreNmsClient::acknowledge_alert(self, id).await
    }

    async fn unmute_alert(&self, id: u64) -> Result<bool, LibreNmsError> {
        LibreNmsClient::unmute_alert(self, id).await
    }

    async fn list_alerts(&self, filter: &AlertFilter) -> Result<Option<Vec<Alert>>, LibreNmsError> {
        LibreNmsClient::list_alerts(self, filter).await
    }

    async fn all_alerts(&self) -> Result<Option<Vec<Alert>>, LibreNmsError> {
        LibreNmsClient::all_alerts(self).await
    }

    async fn add_location(&self, request: &LocationRequest) -> Result<Option<String>, LibreNmsError> {
        LibreNmsClient::add_location(self, request).await
    }

    async fn get_location(&self, name: &str) -> Result<Option<Location>, LibreNmsError> {
        LibreNmsClient::get_location(self, name).await
    }

    async fn list_locations(&self) -> Result<Option<Vec<Location>>, LibreNmsError> {
        LibreNmsClient::list_locations(self).await
    }

    async fn delete_location(&self, name: &str) -> Result<Option<String>, LibreNmsError> {
        LibreNmsClient::delete_location(self, name).await
    }

    async fn edit_location(&self, name: &str, update: &LocationUpdate) -> Result<bool, LibreNmsError> {
        LibreNmsClient::edit_location(self, name, update).await
    }

    async fn device_logs(&self, device: DeviceRef, kind: LogKind, query: &LogQuery) -> Result<Option<Vec<LogEntry>>, LibreNmsError> {
        LibreNmsClient::device_logs(self, device, kind, query).await
    }

    async fn device_alerts(&self, device: DeviceRef) -> Result<Option<Vec<LogEntry>>, LibreNmsError> {
        LibreNmsClient::device_alerts(self, device).await
    }

    async fn device_events(&self, device: DeviceRef) -> Result<Option<Vec<LogEntry>>, LibreNmsError> {
        LibreNmsClient::device_events(self, device).await
    }

    async fn list_sensors(&self, force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError> {
        LibreNmsClient::list_sensors(self, force).await
    }

    async fn device_sensors(&self, device: DeviceRef, force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError> {
        LibreNmsClient::device_sensors(self, device, force).await
    }

    async fn sensors_by_class(&self, class: &str, force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError> {
        LibreNmsClient::sensors_by_class(self, class, force).await
    }
}
