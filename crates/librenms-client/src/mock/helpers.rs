//! Helper functions for creating LibreNMS records in tests and mock implementations

use crate::common::{CONTENT_TYPE_PNG, Image};
use crate::models::*;
use serde_json::{Map, Value};

/// Minimal SNMP-polled device that is up
pub fn device(device_id: u64, hostname: &str) -> Device {
    Device {
        device_id,
        hostname: hostname.to_string(),
        sys_name: Some(hostname.to_string()),
        display: None,
        ip: None,
        os: None,
        hardware: None,
        version: None,
        location: None,
        location_id: None,
        device_type: None,
        status: Some(true),
        disabled: Some(false),
        ignore: Some(false),
        snmp_disable: Some(false),
        uptime: None,
        extra: Map::new(),
    }
}

/// Device record as LibreNMS would create it from an add request
pub fn device_from_request(device_id: u64, request: &AddDeviceRequest) -> Device {
    let mut created = device(device_id, &request.hostname);
    created.display.clone_from(&request.display);
    created.os.clone_from(&request.os);
    created.hardware.clone_from(&request.hardware);
    created.snmp_disable = Some(request.snmp_disable.unwrap_or(false));
    created
}

/// Port with just the identifying columns filled in
pub fn port(port_id: u64, device_id: u64, if_name: &str) -> Port {
    Port {
        port_id: Some(port_id),
        device_id: Some(device_id),
        ifName: Some(if_name.to_string()),
        ifDescr: Some(if_name.to_string()),
        ifAlias: None,
        ifType: None,
        ifMtu: None,
        ifSpeed: None,
        ifOperStatus: Some("up".to_string()),
        ifAdminStatus: Some("up".to_string()),
        ifPhysAddress: None,
        extra: Map::new(),
    }
}

/// PNG graph payload
pub fn png(data: &[u8]) -> Image {
    Image {
        content_type: CONTENT_TYPE_PNG.to_string(),
        data: data.to_vec(),
    }
}

/// Alert raised by rule 1 on a device
pub fn alert(id: u64, device_id: u64, state: AlertState) -> Alert {
    Alert {
        id,
        device_id: Some(device_id),
        rule_id: Some(1),
        state: Some(u64::from(state.code())),
        severity: Some("critical".to_string()),
        hostname: None,
        name: Some("Device Down".to_string()),
        timestamp: Some(format!("2024-05-01 00:00:{:02}", id % 60)),
        extra: Map::new(),
    }
}

/// Location without coordinates
pub fn location(id: u64, name: &str) -> Location {
    Location {
        id: Some(id),
        location: name.to_string(),
        lat: None,
        lng: None,
        fixed_coordinates: Some(false),
        timestamp: None,
        extra: Map::new(),
    }
}

/// Log line carrying only a message
pub fn log_entry(device_id: u64, message: &str) -> LogEntry {
    let mut extra = Map::new();
    extra.insert("message".to_string(), Value::String(message.to_string()));
    LogEntry {
        device_id: Some(device_id),
        hostname: None,
        extra,
    }
}

/// Active sensor of a class with a current reading
pub fn sensor(sensor_id: u64, device_id: u64, class: &str) -> Sensor {
    Sensor {
        sensor_id,
        device_id: Some(device_id),
        sensor_class: Some(class.to_string()),
        sensor_type: None,
        sensor_descr: Some(format!("{class} {sensor_id}")),
        sensor_current: Some(21.5),
        sensor_limit: None,
        sensor_limit_low: None,
        sensor_deleted: Some(false),
        extra: Map::new(),
    }
}
