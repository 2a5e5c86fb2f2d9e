//! LibreNMS API models
//!
//! These models match the JSON returned by the LibreNMS v0 API.
//! See: https://docs.librenms.org/API/
//!
//! LibreNMS is not strict about scalar types (ids and counters arrive as
//! numbers on one install and as strings on another), so numeric fields go
//! through the lenient deserializers below. Fields not modelled explicitly
//! are kept in `extra`.

use crate::error::LibreNmsError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Device record as returned by `/devices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "fields mirror the LibreNMS API JSON keys")]
pub struct Device {
    #[serde(deserialize_with = "de::u64_lenient")]
    pub device_id: u64,
    pub hostname: String,
    #[serde(default, rename = "sysName")]
    pub sys_name: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub hardware: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub location_id: Option<u64>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_bool_lenient")]
    pub status: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_bool_lenient")]
    pub disabled: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_bool_lenient")]
    pub ignore: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_bool_lenient")]
    pub snmp_disable: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub uptime: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    /// True when the device is polled over SNMP
    ///
    /// False when the record carries no `snmp_disable` flag at all.
    #[must_use]
    pub fn has_snmp(&self) -> bool {
        self.snmp_disable.is_some_and(|disabled| !disabled)
    }
}

/// A device identified either by numeric id or by hostname
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceRef {
    /// LibreNMS `device_id`
    Id(u64),
    /// Hostname or IP the device was added with
    Hostname(String),
}

impl DeviceRef {
    /// Listing filter matching this reference
    #[must_use]
    pub fn query_type(&self) -> DeviceQueryType {
        match self {
            Self::Id(_) => DeviceQueryType::DeviceId,
            Self::Hostname(_) => DeviceQueryType::Hostname,
        }
    }

    /// Value sent as the listing `query` parameter
    #[must_use]
    pub fn query_value(&self) -> String {
        self.to_string()
    }

    /// True when `device` is the record this reference names
    #[must_use]
    pub fn matches(&self, device: &Device) -> bool {
        match self {
            Self::Id(id) => device.device_id == *id,
            Self::Hostname(hostname) => device.hostname == *hostname,
        }
    }
}

impl fmt::Display for DeviceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Hostname(hostname) => f.write_str(hostname),
        }
    }
}

impl From<u64> for DeviceRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<u32> for DeviceRef {
    fn from(id: u32) -> Self {
        Self::Id(u64::from(id))
    }
}

impl From<&str> for DeviceRef {
    fn from(hostname: &str) -> Self {
        Self::Hostname(hostname.to_string())
    }
}

impl From<String> for DeviceRef {
    fn from(hostname: String) -> Self {
        Self::Hostname(hostname)
    }
}

impl From<&String> for DeviceRef {
    fn from(hostname: &String) -> Self {
        Self::Hostname(hostname.clone())
    }
}

/// `type` filter of the device listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceQueryType {
    /// All devices
    All,
    /// Not ignored and not disabled
    Active,
    /// Only ignored devices
    Ignored,
    /// Only devices that are up
    Up,
    /// Only devices that are down
    Down,
    /// Disabled devices
    Disabled,
    /// Search by OS type
    Os,
    /// Search by MAC address
    Mac,
    /// Search by IPv4 address
    Ipv4,
    /// Search by IPv6 address
    Ipv6,
    /// Search by location name
    Location,
    /// Search by location id
    LocationId,
    /// Search by hostname
    Hostname,
    /// Search by sysName
    SysName,
    /// Search by display name
    Display,
    /// Exact match on device id
    DeviceId,
    /// Search by device type
    Type,
}

impl DeviceQueryType {
    /// Wire value of the filter
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Ignored => "ignored",
            Self::Up => "up",
            Self::Down => "down",
            Self::Disabled => "disabled",
            Self::Os => "os",
            Self::Mac => "mac",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Location => "location",
            Self::LocationId => "location_id",
            Self::Hostname => "hostname",
            Self::SysName => "sysName",
            Self::Display => "display",
            Self::DeviceId => "device_id",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for DeviceQueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SNMP versions accepted when adding a device
pub const SNMP_VERSIONS: [&str; 3] = ["v1", "v2c", "v3"];

/// Request body for adding a device
///
/// Only `hostname` is required. Unknown LibreNMS options can be passed
/// through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "fields mirror the LibreNMS API JSON keys")]
pub struct AddDeviceRequest {
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmpver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authlevel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authpass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authalgo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptopass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptoalgo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_association_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snmp_disable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_add: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poller_group: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AddDeviceRequest {
    /// Request for an SNMP v2c device
    pub fn snmp_v2c(hostname: impl Into<String>, community: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            snmpver: Some("v2c".to_string()),
            community: Some(community.into()),
            ..Self::default()
        }
    }

    /// Request for a ping-only device
    pub fn icmp_only(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            snmp_disable: Some(true),
            ..Self::default()
        }
    }
}

/// Request body for maintenance mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    /// Duration as `H:i` (hours:minutes)
    pub duration: String,
    /// Short description shown in the maintenance schedule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Start time as `Y-m-d H:i:00`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

impl MaintenanceRequest {
    /// Maintenance window of the given length starting now
    #[must_use]
    pub fn for_duration(duration: chrono::Duration) -> Self {
        let minutes = duration.num_minutes().max(0);
        Self {
            duration: format!("{:02}:{:02}", minutes / 60, minutes % 60),
            ..Self::default()
        }
    }

    /// Start the window at a fixed local time
    #[must_use]
    pub fn starting_at(mut self, start: chrono::NaiveDateTime) -> Self {
        self.start = Some(start.format("%Y-%m-%d %H:%M:00").to_string());
        self
    }

    /// Attach a title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Availability over one reporting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    /// Window length in seconds
    #[serde(deserialize_with = "de::u64_lenient")]
    pub duration: u64,
    /// Percentage of the window the device was up
    #[serde(deserialize_with = "de::f64_lenient")]
    pub availability_perc: f64,
}

/// One outage interval (unix timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "fields mirror the LibreNMS API JSON keys")]
pub struct Outage {
    #[serde(deserialize_with = "de::u64_lenient")]
    pub going_down: u64,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub up_again: Option<u64>,
}

/// IPv4 or IPv6 address assigned to a device port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "fields mirror the LibreNMS API JSON keys")]
pub struct IpAddress {
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub port_id: Option<u64>,
    #[serde(default)]
    pub ipv4_address: Option<String>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub ipv4_prefixlen: Option<u64>,
    #[serde(default)]
    pub ipv6_address: Option<String>,
    #[serde(default)]
    pub ipv6_compressed: Option<String>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub ipv6_prefixlen: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IpAddress {
    /// The address in whichever family the record carries
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.ipv4_address
            .as_deref()
            .or(self.ipv6_compressed.as_deref())
            .or(self.ipv6_address.as_deref())
    }
}

/// Port (interface) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(
    non_snake_case,
    missing_docs,
    reason = "field names mirror the IF-MIB columns LibreNMS returns"
)]
pub struct Port {
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub port_id: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub device_id: Option<u64>,
    #[serde(default)]
    pub ifName: Option<String>,
    #[serde(default)]
    pub ifDescr: Option<String>,
    #[serde(default)]
    pub ifAlias: Option<String>,
    #[serde(default)]
    pub ifType: Option<String>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub ifMtu: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub ifSpeed: Option<u64>,
    #[serde(default)]
    pub ifOperStatus: Option<String>,
    #[serde(default)]
    pub ifAdminStatus: Option<String>,
    #[serde(default)]
    pub ifPhysAddress: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Columns requested when listing a device's ports
pub const DEFAULT_DEVICE_PORT_COLUMNS: &str = "device_id,port_id,disabled,deleted,ignore,ifName,\
    ifDescr,ifAlias,ifMtu,ifType,ifVlan,ifSpeed,ifOperStatus,\
    ifAdminStatus,ifPhysAddress,ifInErrors,ifOutErrors,poll_time";

/// Columns requested when listing every port
pub const DEFAULT_PORT_COLUMNS: &str = "device_id,port_id,deleted,ifName,ifDescr,ifAlias,ifMtu,\
    ifType,ifSpeed,ifOperStatus,ifAdminStatus,ifPhysAddress,ifInErrors,ifOutErrors";

/// CDP/LLDP neighbour link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "fields mirror the LibreNMS API JSON keys")]
pub struct Link {
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub local_port_id: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub local_device_id: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub remote_port_id: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub remote_device_id: Option<u64>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub remote_hostname: Option<String>,
    #[serde(default)]
    pub remote_port: Option<String>,
    #[serde(default)]
    pub remote_platform: Option<String>,
    #[serde(default)]
    pub remote_version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Graph image of one port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortGraph {
    /// Interface name the graph was requested for
    pub if_name: String,
    /// PNG payload
    pub image: crate::common::Image,
}

/// Graph type used when none is given
pub const DEFAULT_PORT_GRAPH_TYPE: &str = "port_bits";

/// Version information reported by `/system`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "fields mirror the LibreNMS API JSON keys")]
pub struct SystemInfo {
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub local_ver: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub local_sha: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub local_date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub local_branch: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub db_schema: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub php_ver: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub database_ver: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub rrdtool_ver: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string_lenient")]
    pub netsnmp_ver: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of a graph listing such as `/devices/{id}/wireless`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    /// Graph type to request
    pub name: String,
    /// Human readable description
    #[serde(default)]
    pub desc: Option<String>,
}

/// Alert record as returned by `/alerts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "fields mirror the LibreNMS API JSON keys")]
pub struct Alert {
    #[serde(deserialize_with = "de::u64_lenient")]
    pub id: u64,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub device_id: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub rule_id: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub state: Option<u64>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `state` filter of the alert listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertState {
    /// Recovered
    Ok,
    /// Alerting
    Alerting,
    /// Acknowledged
    Acknowledged,
}

impl AlertState {
    /// Every state, in wire order
    pub const ALL: [Self; 3] = [Self::Ok, Self::Alerting, Self::Acknowledged];

    /// Numeric value sent to LibreNMS
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Alerting => 1,
            Self::Acknowledged => 2,
        }
    }
}

impl TryFrom<u8> for AlertState {
    type Error = LibreNmsError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|state| state.code() == code)
            .ok_or_else(|| LibreNmsError::InvalidRequest("Invalid state parameter".to_string()))
    }
}

/// `severity` filter of the alert listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertSeverity {
    /// ok
    Ok,
    /// warning
    Warning,
    /// critical
    Critical,
}

impl AlertSeverity {
    /// Wire value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for AlertSeverity {
    type Err = LibreNmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            _ => Err(LibreNmsError::InvalidRequest(
                "Invalid severity parameter".to_string(),
            )),
        }
    }
}

/// Sort direction of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    /// Wire value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = LibreNmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(LibreNmsError::InvalidRequest(
                "Invalid order parameter".to_string(),
            )),
        }
    }
}

/// Filters of the alert listing; unset fields are not sent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFilter {
    /// Alert state
    pub state: Option<AlertState>,
    /// Severity
    pub severity: Option<AlertSeverity>,
    /// Order by timestamp
    pub order: Option<SortOrder>,
    /// Only alerts raised by this rule
    pub alert_rule: Option<u64>,
}

impl AlertFilter {
    /// Filter on one state
    #[must_use]
    pub fn in_state(state: AlertState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    /// Query parameters for `/alerts`
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(state) = self.state {
            params.push(("state", state.code().to_string()));
        }
        if let Some(severity) = self.severity {
            params.push(("severity", severity.as_str().to_string()));
        }
        if let Some(order) = self.order {
            params.push(("order", format!("timestamp {}", order.as_str())));
        }
        if let Some(rule) = self.alert_rule {
            params.push(("alert_rule", rule.to_string()));
        }
        params
    }
}

/// Location record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "fields mirror the LibreNMS API JSON keys")]
pub struct Location {
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub id: Option<u64>,
    pub location: String,
    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_bool_lenient")]
    pub fixed_coordinates: Option<bool>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for adding a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRequest {
    /// Location name
    pub location: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Keep these coordinates instead of geocoding the name
    pub fixed_coordinates: bool,
}

impl LocationRequest {
    /// Location at the given coordinates
    pub fn new(location: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            location: location.into(),
            lat,
            lng,
            fixed_coordinates: false,
        }
    }

    /// Pin the coordinates
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.fixed_coordinates = true;
        self
    }
}

/// Request body for editing a location; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdate {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// New latitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// New longitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Pin or unpin the coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_coordinates: Option<bool>,
}

impl LocationUpdate {
    /// True when nothing would change
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.fixed_coordinates.is_none()
    }
}

/// Log families served under `/logs`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    /// Alert state changes
    Alert,
    /// Web UI logins
    Auth,
    /// Device event log
    Event,
    /// Syslog messages
    Sys,
}

impl LogKind {
    /// Path segment under `/logs`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alertlog",
            Self::Auth => "authlog",
            Self::Event => "eventlog",
            Self::Sys => "syslog",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paging and time window of a log query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Maximum number of entries
    pub limit: Option<u32>,
    /// Offset of the first entry
    pub start: Option<u32>,
    /// Earliest timestamp, as LibreNMS parses it
    pub from: Option<String>,
    /// Latest timestamp
    pub to: Option<String>,
}

impl LogQuery {
    /// Query parameters for `/logs/...`
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        [
            ("limit", self.limit.map(|v| v.to_string())),
            ("start", self.start.map(|v| v.to_string())),
            ("from", self.from.clone()),
            ("to", self.to.clone()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}

/// One log line; the columns differ per [`LogKind`] and land in `extra`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Device the entry belongs to
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub device_id: Option<u64>,
    /// Device hostname, when the log joins it in
    #[serde(default)]
    pub hostname: Option<String>,
    /// Remaining columns
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Health sensor record from `/resources/sensors`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs, reason = "fields mirror the LibreNMS API JSON keys")]
pub struct Sensor {
    #[serde(deserialize_with = "de::u64_lenient")]
    pub sensor_id: u64,
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub device_id: Option<u64>,
    #[serde(default)]
    pub sensor_class: Option<String>,
    #[serde(default)]
    pub sensor_type: Option<String>,
    #[serde(default)]
    pub sensor_descr: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    pub sensor_current: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    pub sensor_limit: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    pub sensor_limit_low: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_bool_lenient")]
    pub sensor_deleted: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Sensor {
    /// True unless LibreNMS marked the sensor deleted
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.sensor_deleted != Some(true)
    }
}

/// Deserializers tolerant of LibreNMS's number/string mixing
pub(crate) mod de {
    use super::{Deserialize, Deserializer, Value};
    use serde::de::Error;

    fn value_to_u64<E: Error>(value: &Value) -> Result<Option<u64>, E> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_u64()
                .map(Some)
                .ok_or_else(|| E::custom(format!("expected unsigned integer, got {n}"))),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("expected unsigned integer, got '{s}'"))),
            other => Err(E::custom(format!("expected unsigned integer, got {other}"))),
        }
    }

    pub fn u64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        let value = Value::deserialize(d)?;
        value_to_u64(&value)?.ok_or_else(|| D::Error::custom("missing unsigned integer"))
    }

    pub fn opt_u64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        let value = Value::deserialize(d)?;
        value_to_u64(&value)
    }

    fn value_to_f64<E: Error>(value: &Value) -> Result<Option<f64>, E> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| E::custom(format!("expected number, got {n}"))),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("expected number, got '{s}'"))),
            other => Err(E::custom(format!("expected number, got {other}"))),
        }
    }

    pub fn f64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(d)?;
        value_to_f64(&value)?.ok_or_else(|| D::Error::custom("missing number"))
    }

    pub fn opt_f64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(d)?;
        value_to_f64(&value)
    }

    pub fn opt_bool_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(b)),
            Value::Number(n) => Ok(Some(n.as_i64() != Some(0))),
            Value::String(s) => match s.trim() {
                "" => Ok(None),
                "0" | "false" => Ok(Some(false)),
                _ => Ok(Some(true)),
            },
            other => Err(D::Error::custom(format!("expected boolean, got {other}"))),
        }
    }

    pub fn opt_string_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        match Value::deserialize(d)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            other => Err(D::Error::custom(format!("expected string, got {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_accepts_string_and_numeric_scalars() {
        let device: Device = serde_json::from_value(json!({
            "device_id": "7",
            "hostname": "core1",
            "sysName": "core1.lab",
            "status": 1,
            "disabled": "0",
            "snmp_disable": 0,
            "uptime": "3600",
            "location_id": null,
            "purpose": "spine"
        }))
        .expect("device");

        assert_eq!(device.device_id, 7);
        assert_eq!(device.sys_name.as_deref(), Some("core1.lab"));
        assert_eq!(device.status, Some(true));
        assert_eq!(device.disabled, Some(false));
        assert_eq!(device.uptime, Some(3600));
        assert_eq!(device.location_id, None);
        assert!(device.has_snmp());
        assert_eq!(device.extra.get("purpose"), Some(&json!("spine")));
    }

    #[test]
    fn test_device_without_id_is_rejected() {
        let result = serde_json::from_value::<Device>(json!({"hostname": "orphan"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_device_ref_conversions() {
        assert_eq!(DeviceRef::from(42_u64), DeviceRef::Id(42));
        assert_eq!(DeviceRef::from("sw1"), DeviceRef::Hostname("sw1".into()));
        assert_eq!(DeviceRef::Id(42).query_type(), DeviceQueryType::DeviceId);
        assert_eq!(DeviceRef::from("sw1").query_type().as_str(), "hostname");
        assert_eq!(DeviceRef::Id(42).query_value(), "42");
    }

    #[test]
    fn test_device_ref_matches_exactly() {
        let device: Device =
            serde_json::from_value(json!({"device_id": 10, "hostname": "sw10"})).expect("device");
        assert!(DeviceRef::Id(10).matches(&device));
        assert!(DeviceRef::from("sw10").matches(&device));
        assert!(!DeviceRef::from("sw1").matches(&device));
        assert!(!DeviceRef::Id(1).matches(&device));
    }

    #[test]
    fn test_add_device_request_skips_unset_fields() {
        let body = serde_json::to_value(AddDeviceRequest::snmp_v2c("sw1", "public")).expect("json");
        assert_eq!(body, json!({"hostname": "sw1", "snmpver": "v2c", "community": "public"}));
    }

    #[test]
    fn test_maintenance_request_formats() {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(22, 30, 15))
            .expect("valid date");
        let request = MaintenanceRequest::for_duration(chrono::Duration::minutes(90))
            .starting_at(start)
            .with_title("Firmware");
        assert_eq!(request.duration, "01:30");
        assert_eq!(request.start.as_deref(), Some("2024-05-01 22:30:00"));
        assert_eq!(request.title.as_deref(), Some("Firmware"));
    }

    #[test]
    fn test_availability_percentage_as_string() {
        let availability: Availability =
            serde_json::from_value(json!({"duration": 86400, "availability_perc": "99.5"}))
                .expect("availability");
        assert_eq!(availability.duration, 86400);
        assert!((availability.availability_perc - 99.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ip_address_prefers_ipv4_then_compressed_ipv6() {
        let v4: IpAddress =
            serde_json::from_value(json!({"ipv4_address": "10.0.0.1", "ipv4_prefixlen": "30"}))
                .expect("v4");
        assert_eq!(v4.address(), Some("10.0.0.1"));
        assert_eq!(v4.ipv4_prefixlen, Some(30));

        let v6: IpAddress = serde_json::from_value(json!({
            "ipv6_address": "2001:0db8:0000:0000:0000:0000:0000:0001",
            "ipv6_compressed": "2001:db8::1"
        }))
        .expect("v6");
        assert_eq!(v6.address(), Some("2001:db8::1"));
    }

    #[test]
    fn test_alert_filter_validation_and_params() {
        assert_eq!(AlertState::try_from(2).expect("state"), AlertState::Acknowledged);
        assert!(matches!(AlertState::try_from(3), Err(LibreNmsError::InvalidRequest(_))));
        assert_eq!("CRITICAL".parse::<AlertSeverity>().expect("severity"), AlertSeverity::Critical);
        assert!("blah".parse::<AlertSeverity>().is_err());
        assert!("sideways".parse::<SortOrder>().is_err());

        let filter = AlertFilter {
            state: Some(AlertState::Ok),
            severity: Some(AlertSeverity::Warning),
            order: Some(SortOrder::Desc),
            alert_rule: Some(4),
        };
        assert_eq!(
            filter.query_params(),
            vec![
                ("state", "0".to_string()),
                ("severity", "warning".to_string()),
                ("order", "timestamp desc".to_string()),
                ("alert_rule", "4".to_string()),
            ]
        );
        assert!(AlertFilter::default().query_params().is_empty());
    }

    #[test]
    fn test_location_accepts_string_coordinates() {
        let location: Location = serde_json::from_value(json!({
            "id": "3",
            "location": "Lab",
            "lat": "37.4220041",
            "lng": null,
            "fixed_coordinates": 1
        }))
        .expect("location");
        assert_eq!(location.id, Some(3));
        assert!(location.lat.is_some_and(|lat| (lat - 37.422_004_1).abs() < 1e-9));
        assert_eq!(location.lng, None);
        assert_eq!(location.fixed_coordinates, Some(true));

        let update = LocationUpdate {
            lat: Some(1.5),
            ..LocationUpdate::default()
        };
        assert_eq!(serde_json::to_value(&update).expect("json"), json!({"lat": 1.5}));
        assert!(LocationUpdate::default().is_empty());
    }

    #[test]
    fn test_log_query_params_skip_unset() {
        let query = LogQuery {
            limit: Some(10),
            to: Some("2024-05-01 00:00:00".to_string()),
            ..LogQuery::default()
        };
        assert_eq!(
            query.query_params(),
            vec![("limit", "10".to_string()), ("to", "2024-05-01 00:00:00".to_string())]
        );
        assert_eq!(LogKind::Sys.to_string(), "syslog");
    }

    #[test]
    fn test_sensor_deleted_flag() {
        let sensor: Sensor = serde_json::from_value(json!({
            "sensor_id": 12,
            "device_id": "42",
            "sensor_class": "temperature",
            "sensor_current": "41",
            "sensor_deleted": "1"
        }))
        .expect("sensor");
        assert_eq!(sensor.device_id, Some(42));
        assert_eq!(sensor.sensor_current, Some(41.0));
        assert!(!sensor.is_active());
    }
}
