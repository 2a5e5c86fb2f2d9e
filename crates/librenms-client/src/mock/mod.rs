//! Mock LibreNmsClient for unit testing
//!
//! This module provides a mock implementation of LibreNmsClientTrait that can be used
//! in unit tests without requiring a running LibreNMS instance.
//!
//! The mock is organized into modules:
//! - `devices.rs` - Device listing, resolution and per-device resources
//! - `resources.rs` - Alerts, locations, logs and sensors
//! - `helpers.rs` - Helper functions for creating records

mod devices;
pub mod helpers;
mod resources;

use crate::common::Image;
use crate::error::LibreNmsError;
use crate::librenms_trait::LibreNmsClientTrait;
use crate::models::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock LibreNmsClient for testing
///
/// This mock stores resources in memory and can be configured to return
/// specific responses for testing different scenarios.
#[derive(Clone)]
pub struct MockLibreNmsClient {
    pub(crate) base_url: String,
    // In-memory storage for resources
    pub(crate) devices: Arc<Mutex<HashMap<u64, Device>>>,
    pub(crate) ports: Arc<Mutex<HashMap<u64, Port>>>,
    pub(crate) availability: Arc<Mutex<HashMap<u64, Vec<Availability>>>>,
    pub(crate) outages: Arc<Mutex<HashMap<u64, Vec<Outage>>>>,
    pub(crate) ip_addresses: Arc<Mutex<HashMap<u64, Vec<IpAddress>>>>,
    pub(crate) links: Arc<Mutex<HashMap<u64, Vec<Link>>>>,
    // Keyed by (device_id, graph type) and (device_id, ifName, graph type)
    pub(crate) device_graphs: Arc<Mutex<HashMap<(u64, String), Image>>>,
    pub(crate) port_graphs: Arc<Mutex<HashMap<(u64, String, String), Image>>>,
    pub(crate) wireless: Arc<Mutex<HashMap<u64, Vec<GraphDescriptor>>>>,
    pub(crate) alerts: Arc<Mutex<HashMap<u64, Alert>>>,
    pub(crate) locations: Arc<Mutex<HashMap<String, Location>>>,
    pub(crate) logs: Arc<Mutex<HashMap<(u64, LogKind), Vec<LogEntry>>>>,
    pub(crate) sensors: Arc<Mutex<HashMap<u64, Sensor>>>,
    pub(crate) system: Arc<Mutex<Option<SystemInfo>>>,
    // Set to reject the token with the given HTTP status
    pub(crate) auth_failure: Arc<Mutex<Option<u16>>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

/// Lock a store, recovering the data if a test thread panicked while holding it
pub(crate) fn lock<T>(store: &Mutex<T>) -> MutexGuard<'_, T> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockLibreNmsClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            devices: Arc::new(Mutex::new(HashMap::new())),
            ports: Arc::new(Mutex::new(HashMap::new())),
            availability: Arc::new(Mutex::new(HashMap::new())),
            outages: Arc::new(Mutex::new(HashMap::new())),
            ip_addresses: Arc::new(Mutex::new(HashMap::new())),
            links: Arc::new(Mutex::new(HashMap::new())),
            device_graphs: Arc::new(Mutex::new(HashMap::new())),
            port_graphs: Arc::new(Mutex::new(HashMap::new())),
            wireless: Arc::new(Mutex::new(HashMap::new())),
            alerts: Arc::new(Mutex::new(HashMap::new())),
            locations: Arc::new(Mutex::new(HashMap::new())),
            logs: Arc::new(Mutex::new(HashMap::new())),
            sensors: Arc::new(Mutex::new(HashMap::new())),
            system: Arc::new(Mutex::new(None)),
            auth_failure: Arc::new(Mutex::new(None)),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add a device to the mock store (for test setup)
    pub fn insert_device(&self, device: Device) {
        let mut next_id = lock(&self.next_id);
        *next_id = (*next_id).max(device.device_id + 1);
        lock(&self.devices).insert(device.device_id, device);
    }

    /// Add a port to the mock store (for test setup)
    ///
    /// Ports without a `port_id` are ignored.
    pub fn insert_port(&self, port: Port) {
        if let Some(port_id) = port.port_id {
            lock(&self.ports).insert(port_id, port);
        }
    }

    /// Set availability windows for a device (for test setup)
    pub fn set_availability(&self, device_id: u64, windows: Vec<Availability>) {
        lock(&self.availability).insert(device_id, windows);
    }

    /// Set outage history for a device (for test setup)
    pub fn set_outages(&self, device_id: u64, outages: Vec<Outage>) {
        lock(&self.outages).insert(device_id, outages);
    }

    /// Set IP addresses for a device (for test setup)
    pub fn set_ip_addresses(&self, device_id: u64, addresses: Vec<IpAddress>) {
        lock(&self.ip_addresses).insert(device_id, addresses);
    }

    /// Set CDP/LLDP links for a device (for test setup)
    pub fn set_links(&self, device_id: u64, links: Vec<Link>) {
        lock(&self.links).insert(device_id, links);
    }

    /// Set a device graph (for test setup)
    pub fn set_device_graph(&self, device_id: u64, graph_type: &str, image: Image) {
        lock(&self.device_graphs).insert((device_id, graph_type.to_string()), image);
    }

    /// Set a port graph (for test setup)
    pub fn set_port_graph(&self, device_id: u64, if_name: &str, graph_type: &str, image: Image) {
        lock(&self.port_graphs).insert((device_id, if_name.to_string(), graph_type.to_string()), image);
    }

    /// Set the wireless graphs of a device (for test setup)
    pub fn set_wireless_graphs(&self, device_id: u64, graphs: Vec<GraphDescriptor>) {
        lock(&self.wireless).insert(device_id, graphs);
    }

    /// Add an alert to the mock store (for test setup)
    pub fn insert_alert(&self, alert: Alert) {
        lock(&self.alerts).insert(alert.id, alert);
    }

    /// Add a location to the mock store (for test setup)
    pub fn insert_location(&self, location: Location) {
        lock(&self.locations).insert(location.location.clone(), location);
    }

    /// Set the log entries of one kind for a device (for test setup)
    pub fn set_logs(&self, device_id: u64, kind: LogKind, entries: Vec<LogEntry>) {
        lock(&self.logs).insert((device_id, kind), entries);
    }

    /// Add a sensor to the mock store (for test setup)
    pub fn insert_sensor(&self, sensor: Sensor) {
        lock(&self.sensors).insert(sensor.sensor_id, sensor);
    }

    /// Set the `/system` answer (for test setup)
    pub fn set_system_info(&self, info: SystemInfo) {
        *lock(&self.system) = Some(info);
    }

    /// Make every call fail as if the token were rejected with `status`
    pub fn reject_token(&self, status: u16) {
        *lock(&self.auth_failure) = Some(status);
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = lock(&self.next_id);
        let current = *id;
        *id += 1;
        current
    }

    fn check_token(&self) -> Result<(), LibreNmsError> {
        match *lock(&self.auth_failure) {
            Some(status) => Err(LibreNmsError::Http {
                status,
                message: "Unauthenticated.".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn device_ports_of(&self, device_id: u64) -> Vec<Port> {
        let mut ports: Vec<Port> = lock(&self.ports)
            .values()
            .filter(|p| p.device_id == Some(device_id))
            .cloned()
            .collect();
        ports.sort_by_key(|p| p.port_id);
        ports
    }
}

#[async_trait::async_trait]
impl LibreNmsClientTrait for MockLibreNmsClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), LibreNmsError> {
        self.check_token()
    }

    async fn system_info(&self) -> Result<Option<SystemInfo>, LibreNmsError> {
        self.check_token()?;
        Ok(lock(&self.system).clone())
    }

    async fn list_devices_by(&self, query_type: DeviceQueryType, query: Option<&str>) -> Result<Option<Vec<Device>>, LibreNmsError> {
        self.check_token()?;
        Ok(devices::list_by(self, query_type, query))
    }

    async fn get_device(&self, device: DeviceRef) -> Result<Option<Device>, LibreNmsError> {
        self.check_token()?;
        Ok(devices::find(self, &device))
    }

    async fn resolve_device(&self, device: DeviceRef) -> Result<Device, LibreNmsError> {
        self.check_token()?;
        devices::resolve(self, &device)
    }

    async fn add_device(&self, request: AddDeviceRequest) -> Result<Option<Vec<Device>>, LibreNmsError> {
        self.check_token()?;
        devices::add(self, request)
    }

    async fn delete_device(&self, device: DeviceRef) -> Result<Option<Vec<Device>>, LibreNmsError> {
        self.check_token()?;
        Ok(devices::delete(self, &device))
    }

    async fn rename_device(&self, device: DeviceRef, new_name: &str) -> Result<bool, LibreNmsError> {
        self.check_token()?;
        Ok(devices::rename(self, &device, new_name))
    }

    async fn discover_device(&self, device: DeviceRef) -> Result<bool, LibreNmsError> {
        self.check_token()?;
        Ok(devices::find(self, &device).is_some())
    }

    async fn maintenance_device(&self, device: DeviceRef, _request: &MaintenanceRequest) -> Result<bool, LibreNmsError> {
        self.check_token()?;
        Ok(devices::find(self, &device).is_some())
    }

    async fn device_availability(&self, device: DeviceRef) -> Result<Option<Vec<Availability>>, LibreNmsError> {
        self.check_token()?;
        Ok(devices::availability(self, &device))
    }

    async fn device_outages(&self, device: DeviceRef) -> Result<Option<Vec<Outage>>, LibreNmsError> {
        self.check_token()?;
        Ok(devices::outages(self, &device))
    }

    async fn device_ip_addresses(&self, device: DeviceRef) -> Result<Option<Vec<IpAddress>>, LibreNmsError> {
        self.check_token()?;
        Ok(devices::ip_addresses(self, &device))
    }

    async fn device_links(&self, device: DeviceRef) -> Result<Option<Vec<Link>>, LibreNmsError> {
        self.check_token()?;
        Ok(devices::links(self, &device))
    }

    async fn device_by_ip(&self, ip: &str) -> Result<Option<Device>, LibreNmsError> {
        self.check_token()?;
        let ip = crate::api::devices::normalize_ip(ip);
        let devices = lock(&self.devices);
        let mut matched: Vec<&Device> = devices.values().filter(|d| d.ip.as_deref() == Some(ip.as_str())).collect();
        matched.sort_by_key(|d| d.device_id);
        Ok(matched.first().map(|d| (*d).clone()))
    }

    async fn device_wireless_graphs(&self, device: DeviceRef) -> Result<Option<Vec<GraphDescriptor>>, LibreNmsError> {
        self.check_token()?;
        let Some(found) = devices::find(self, &device) else {
            return Ok(None);
        };
        Ok(lock(&self.wireless).get(&found.device_id).filter(|g| !g.is_empty()).cloned())
    }

    async fn device_has_wireless(&self, device: DeviceRef) -> Result<bool, LibreNmsError> {
        Ok(self.device_wireless_graphs(device).await?.is_some())
    }

    async fn device_ports(&self, device: DeviceRef, _columns: Option<&str>) -> Result<Option<Vec<Port>>, LibreNmsError> {
        self.check_token()?;
        let Some(found) = devices::find(self, &device) else {
            return Ok(None);
        };
        let ports = self.device_ports_of(found.device_id);
        Ok((!ports.is_empty()).then_some(ports))
    }

    async fn get_port(&self, port_id: u64) -> Result<Option<Port>, LibreNmsError> {
        self.check_token()?;
        Ok(lock(&self.ports).get(&port_id).cloned())
    }

    async fn list_ports(&self) -> Result<Option<Vec<Port>>, LibreNmsError> {
        self.check_token()?;
        let mut ports: Vec<Port> = lock(&self.ports).values().cloned().collect();
        ports.sort_by_key(|p| p.port_id);
        Ok((!ports.is_empty()).then_some(ports))
    }

    async fn device_graph(&self, device: DeviceRef, graph_type: &str) -> Result<Option<Image>, LibreNmsError> {
        self.check_token()?;
        let Some(found) = devices::find(self, &device) else {
            return Ok(None);
        };
        Ok(lock(&self.device_graphs).get(&(found.device_id, graph_type.to_string())).cloned())
    }

    async fn device_port_graphs(&self, device: DeviceRef, interfaces: Option<&[&str]>, graph_type: Option<&str>) -> Result<Option<Vec<PortGraph>>, LibreNmsError> {
        self.check_token()?;
        let Some(found) = devices::find(self, &device) else {
            return Ok(None);
        };

        let names: Vec<String> = match interfaces {
            Some(names) => names.iter().map(|n| (*n).to_string()).collect(),
            None => self
                .device_ports_of(found.device_id)
                .into_iter()
                .filter_map(|p| p.ifName)
                .collect(),
        };
        let graph_type = graph_type.unwrap_or(DEFAULT_PORT_GRAPH_TYPE).to_string();

        let graphs = lock(&self.port_graphs);
        let collected: Vec<PortGraph> = names
            .into_iter()
            .filter_map(|if_name| {
                let image = graphs.get(&(found.device_id, if_name.clone(), graph_type.clone()))?.clone();
                Some(PortGraph { if_name, image })
            })
            .collect();
        Ok((!collected.is_empty()).then_some(collected))
    }

    async fn get_alert(&self, id: u64) -> Result<Option<Alert>, LibreNmsError> {
        self.check_token()?;
        Ok(lock(&self.alerts).get(&id).cloned())
    }

    async fn acknowledge_alert(&self, id: u64) -> Result<bool, LibreNmsError> {
        self.check_token()?;
        Ok(resources::set_alert_state(self, id, AlertState::Acknowledged))
    }

    async fn unmute_alert(&self, id: u64) -> Result<bool, LibreNmsError> {
        self.check_token()?;
        Ok(resources::set_alert_state(self, id, AlertState::Alerting))
    }

    async fn list_alerts(&self, filter: &AlertFilter) -> Result<Option<Vec<Alert>>, LibreNmsError> {
        self.check_token()?;
        Ok(resources::list_alerts(self, filter))
    }

    async fn all_alerts(&self) -> Result<Option<Vec<Alert>>, LibreNmsError> {
        self.check_token()?;
        Ok(resources::list_alerts(self, &AlertFilter::default()))
    }

    async fn add_location(&self, request: &LocationRequest) -> Result<Option<String>, LibreNmsError> {
        self.check_token()?;
        resources::add_location(self, request)
    }

    async fn get_location(&self, name: &str) -> Result<Option<Location>, LibreNmsError> {
        self.check_token()?;
        Ok(lock(&self.locations).get(name).cloned())
    }

    async fn list_locations(&self) -> Result<Option<Vec<Location>>, LibreNmsError> {
        self.check_token()?;
        Ok(Some(resources::list_locations(self)))
    }

    async fn delete_location(&self, name: &str) -> Result<Option<String>, LibreNmsError> {
        self.check_token()?;
        Ok(lock(&self.locations)
            .remove(name)
            .map(|l| format!("Location {} has been deleted", l.location)))
    }

    async fn edit_location(&self, name: &str, update: &LocationUpdate) -> Result<bool, LibreNmsError> {
        self.check_token()?;
        resources::edit_location(self, name, update)
    }

    async fn device_logs(&self, device: DeviceRef, kind: LogKind, query: &LogQuery) -> Result<Option<Vec<LogEntry>>, LibreNmsError> {
        self.check_token()?;
        Ok(resources::device_logs(self, &device, kind, query))
    }

    async fn device_alerts(&self, device: DeviceRef) -> Result<Option<Vec<LogEntry>>, LibreNmsError> {
        self.device_logs(device, LogKind::Alert, &LogQuery::default()).await
    }

    async fn device_events(&self, device: DeviceRef) -> Result<Option<Vec<LogEntry>>, LibreNmsError> {
        self.device_logs(device, LogKind::Event, &LogQuery::default()).await
    }

    async fn list_sensors(&self, _force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError> {
        self.check_token()?;
        Ok(resources::sensors(self, |_| true))
    }

    async fn device_sensors(&self, device: DeviceRef, _force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError> {
        self.check_token()?;
        let Some(found) = devices::find(self, &device) else {
            return Ok(None);
        };
        Ok(resources::sensors(self, |s| s.device_id == Some(found.device_id)))
    }

    async fn sensors_by_class(&self, class: &str, _force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError> {
        self.check_token()?;
        Ok(resources::sensors(self, |s| s.is_active() && s.sensor_class.as_deref() == Some(class)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MockLibreNmsClient {
        let mock = MockLibreNmsClient::new("http://mock.local/api/v0");
        mock.insert_device(helpers::device(42, "sw1"));
        let mut router = helpers::device(7, "rtr1");
        router.os = Some("routeros".to_string());
        mock.insert_device(router);
        mock
    }

    #[tokio::test]
    async fn test_resolve_by_hostname_and_id() {
        let mock = seeded();
        assert_eq!(mock.resolve_device(DeviceRef::from("sw1")).await.expect("sw1").device_id, 42);
        assert_eq!(mock.resolve_device(DeviceRef::Id(7)).await.expect("rtr1").hostname, "rtr1");

        let err = mock.resolve_device(DeviceRef::from("ghost")).await.expect_err("unknown");
        assert!(matches!(err, LibreNmsError::DeviceNotFound(ref name) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_list_devices_by_filter() {
        let mock = seeded();
        let all = mock.list_devices_by(DeviceQueryType::All, None).await.expect("list").expect("some");
        assert_eq!(all.iter().map(|d| d.device_id).collect::<Vec<_>>(), vec![7, 42]);

        let routers = mock
            .list_devices_by(DeviceQueryType::Os, Some("routeros"))
            .await
            .expect("list")
            .expect("some");
        assert_eq!(routers.len(), 1);

        assert!(mock.list_devices_by(DeviceQueryType::Os, Some("ios")).await.expect("list").is_none());
    }

    #[tokio::test]
    async fn test_add_device_assigns_next_id_and_rejects_duplicates() {
        let mock = seeded();
        let created = mock
            .add_device(AddDeviceRequest::icmp_only("pinger"))
            .await
            .expect("add")
            .expect("record");
        assert_eq!(created[0].device_id, 43);
        assert!(!created[0].has_snmp());

        let err = mock.add_device(AddDeviceRequest::icmp_only("pinger")).await.expect_err("duplicate");
        assert!(matches!(err, LibreNmsError::Backend { .. }));

        let err = mock.add_device(AddDeviceRequest::default()).await.expect_err("no hostname");
        assert!(matches!(err, LibreNmsError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_rename_and_delete() {
        let mock = seeded();
        assert!(mock.rename_device(DeviceRef::Id(42), "sw1-new").await.expect("rename"));
        assert!(mock.get_device(DeviceRef::from("sw1")).await.expect("get").is_none());
        assert!(mock.get_device(DeviceRef::from("sw1-new")).await.expect("get").is_some());

        let deleted = mock.delete_device(DeviceRef::Id(42)).await.expect("delete").expect("record");
        assert_eq!(deleted[0].hostname, "sw1-new");
        assert!(mock.delete_device(DeviceRef::Id(42)).await.expect("delete").is_none());
    }

    #[tokio::test]
    async fn test_port_graphs_skip_ports_without_data() {
        let mock = seeded();
        mock.insert_port(helpers::port(1, 42, "eth0"));
        mock.insert_port(helpers::port(2, 42, "eth1"));
        mock.set_port_graph(42, "eth1", DEFAULT_PORT_GRAPH_TYPE, helpers::png(b"\x89PNG"));

        let graphs = mock
            .device_port_graphs(DeviceRef::from("sw1"), None, None)
            .await
            .expect("graphs")
            .expect("some");
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].if_name, "eth1");
    }

    #[tokio::test]
    async fn test_alert_acknowledge_and_unmute() {
        let mock = seeded();
        mock.insert_alert(helpers::alert(5, 42, AlertState::Alerting));
        mock.insert_alert(helpers::alert(6, 7, AlertState::Ok));

        assert!(mock.acknowledge_alert(5).await.expect("ack"));
        let acked = mock
            .list_alerts(&AlertFilter::in_state(AlertState::Acknowledged))
            .await
            .expect("list")
            .expect("some");
        assert_eq!(acked.iter().map(|a| a.id).collect::<Vec<_>>(), vec![5]);

        assert!(mock.unmute_alert(5).await.expect("unmute"));
        assert_eq!(mock.get_alert(5).await.expect("get").and_then(|a| a.state), Some(1));
        assert!(!mock.acknowledge_alert(99).await.expect("unknown"));
        assert_eq!(mock.all_alerts().await.expect("all").map(|a| a.len()), Some(2));
    }

    #[tokio::test]
    async fn test_location_lifecycle() {
        let mock = seeded();
        mock.insert_location(helpers::location(1, "HQ"));
        let request = LocationRequest::new("Lab", 37.42, -122.08);
        assert!(mock.add_location(&request).await.expect("add").is_some());
        let names: Vec<String> = mock
            .list_locations()
            .await
            .expect("list")
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.location)
            .collect();
        assert_eq!(names, vec!["HQ", "Lab"]);
        assert!(matches!(
            mock.add_location(&request).await,
            Err(LibreNmsError::Backend { .. })
        ));

        let update = LocationUpdate {
            location: Some("Lab 2".to_string()),
            ..LocationUpdate::default()
        };
        assert!(mock.edit_location("Lab", &update).await.expect("edit"));
        assert!(mock.get_location("Lab").await.expect("get").is_none());
        let moved = mock.get_location("Lab 2").await.expect("get").expect("renamed");
        assert_eq!(moved.lat, Some(37.42));

        assert!(mock.delete_location("Lab 2").await.expect("delete").is_some());
        assert!(mock.delete_location("Lab 2").await.expect("delete").is_none());
        assert!(matches!(
            mock.edit_location("Lab", &LocationUpdate::default()).await,
            Err(LibreNmsError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_device_logs_paging() {
        let mock = seeded();
        let entries = (1..=3).map(|n| helpers::log_entry(42, &format!("event {n}"))).collect();
        mock.set_logs(42, LogKind::Event, entries);

        let page = LogQuery {
            limit: Some(1),
            start: Some(1),
            ..LogQuery::default()
        };
        let logs = mock
            .device_logs(DeviceRef::from("sw1"), LogKind::Event, &page)
            .await
            .expect("logs")
            .expect("some");
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].extra.get("message"), Some(&serde_json::json!("event 2")));

        assert!(mock.device_alerts(DeviceRef::from("sw1")).await.expect("alerts").is_none());
        assert!(mock.device_events(DeviceRef::from("ghost")).await.expect("events").is_none());
    }

    #[tokio::test]
    async fn test_sensors_by_device_and_class() {
        let mock = seeded();
        mock.insert_sensor(helpers::sensor(1, 42, "temperature"));
        mock.insert_sensor(helpers::sensor(2, 7, "temperature"));
        let mut gone = helpers::sensor(3, 7, "temperature");
        gone.sensor_deleted = Some(true);
        mock.insert_sensor(gone);

        let own = mock.device_sensors(DeviceRef::from("rtr1"), false).await.expect("sensors").expect("some");
        assert_eq!(own.len(), 2);

        let temps = mock.sensors_by_class("temperature", false).await.expect("class").expect("some");
        assert_eq!(temps.iter().map(|s| s.sensor_id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(mock.sensors_by_class("voltage", false).await.expect("class").is_none());
    }

    #[tokio::test]
    async fn test_device_by_ip_and_wireless() {
        let mock = seeded();
        let mut ap = helpers::device(9, "ap1");
        ap.ip = Some("10.0.0.1".to_string());
        mock.insert_device(ap);
        mock.set_wireless_graphs(
            9,
            vec![GraphDescriptor {
                name: "device_wireless_clients".to_string(),
                desc: Some("Clients".to_string()),
            }],
        );

        let found = mock.device_by_ip("167772161").await.expect("by ip").expect("found");
        assert_eq!(found.hostname, "ap1");
        assert!(mock.device_has_wireless(DeviceRef::Id(9)).await.expect("wireless"));
        assert!(!mock.device_has_wireless(DeviceRef::Id(42)).await.expect("wireless"));
    }

    #[tokio::test]
    async fn test_rejected_token() {
        let mock = seeded();
        mock.reject_token(401);
        let err = mock.validate_token().await.expect_err("rejected");
        assert_eq!(err.status(), Some(401));
        assert!(mock.system_info().await.is_err());
    }
}
