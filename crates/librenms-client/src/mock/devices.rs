//! Device operations for MockLibreNmsClient
//!
//! Handles listing, resolution, add/delete/rename and the per-device
//! sub-resources (availability, outages, addresses, links)

use super::{MockLibreNmsClient, helpers, lock};
use crate::api::devices::normalize_add_request;
use crate::error::LibreNmsError;
use crate::models::*;

pub fn find(client: &MockLibreNmsClient, device: &DeviceRef) -> Option<Device> {
    let devices = lock(&client.devices);
    match device {
        DeviceRef::Id(id) => devices.get(id).cloned(),
        DeviceRef::Hostname(hostname) => devices.values().find(|d| &d.hostname == hostname).cloned(),
    }
}

pub fn resolve(client: &MockLibreNmsClient, device: &DeviceRef) -> Result<Device, LibreNmsError> {
    find(client, device).ok_or_else(|| LibreNmsError::DeviceNotFound(device.to_string()))
}

pub fn list_by(client: &MockLibreNmsClient, query_type: DeviceQueryType, query: Option<&str>) -> Option<Vec<Device>> {
    let devices = lock(&client.devices);
    let mut matched: Vec<Device> = devices
        .values()
        .filter(|d| matches_filter(d, query_type, query.unwrap_or_default()))
        .cloned()
        .collect();
    matched.sort_by_key(|d| d.device_id);
    (!matched.is_empty()).then_some(matched)
}

fn matches_filter(device: &Device, query_type: DeviceQueryType, query: &str) -> bool {
    let flag = |value: Option<bool>| value.unwrap_or(false);
    match query_type {
        DeviceQueryType::All => true,
        DeviceQueryType::Active => !flag(device.ignore) && !flag(device.disabled),
        DeviceQueryType::Ignored => flag(device.ignore),
        DeviceQueryType::Up => device.status == Some(true),
        DeviceQueryType::Down => device.status == Some(false),
        DeviceQueryType::Disabled => flag(device.disabled),
        DeviceQueryType::Hostname => device.hostname == query,
        DeviceQueryType::DeviceId => device.device_id.to_string() == query,
        DeviceQueryType::Os => device.os.as_deref() == Some(query),
        DeviceQueryType::Location => device.location.as_deref() == Some(query),
        DeviceQueryType::LocationId => device.location_id.is_some_and(|id| id.to_string() == query),
        DeviceQueryType::SysName => device.sys_name.as_deref() == Some(query),
        DeviceQueryType::Display => device.display.as_deref() == Some(query),
        DeviceQueryType::Type => device.device_type.as_deref() == Some(query),
        DeviceQueryType::Ipv4 | DeviceQueryType::Ipv6 => device.ip.as_deref() == Some(query),
        // Mock devices carry no port MACs
        DeviceQueryType::Mac => false,
    }
}

pub fn add(client: &MockLibreNmsClient, request: AddDeviceRequest) -> Result<Option<Vec<Device>>, LibreNmsError> {
    let request = normalize_add_request(request)?;
    if find(client, &DeviceRef::from(&request.hostname)).is_some() {
        return Err(LibreNmsError::Backend {
            status: 200,
            message: format!("Already have device {}", request.hostname),
        });
    }

    let created = helpers::device_from_request(client.next_id(), &request);
    lock(&client.devices).insert(created.device_id, created.clone());
    Ok(Some(vec![created]))
}

pub fn delete(client: &MockLibreNmsClient, device: &DeviceRef) -> Option<Vec<Device>> {
    let found = find(client, device)?;
    lock(&client.devices).remove(&found.device_id);
    Some(vec![found])
}

pub fn rename(client: &MockLibreNmsClient, device: &DeviceRef, new_name: &str) -> bool {
    let Some(found) = find(client, device) else {
        return false;
    };
    if let Some(stored) = lock(&client.devices).get_mut(&found.device_id) {
        stored.hostname = new_name.to_string();
    }
    true
}

pub fn availability(client: &MockLibreNmsClient, device: &DeviceRef) -> Option<Vec<Availability>> {
    let found = find(client, device)?;
    Some(lock(&client.availability).get(&found.device_id).cloned().unwrap_or_default())
}

pub fn outages(client: &MockLibreNmsClient, device: &DeviceRef) -> Option<Vec<Outage>> {
    let found = find(client, device)?;
    Some(lock(&client.outages).get(&found.device_id).cloned().unwrap_or_default())
}

pub fn ip_addresses(client: &MockLibreNmsClient, device: &DeviceRef) -> Option<Vec<IpAddress>> {
    let found = find(client, device)?;
    Some(lock(&client.ip_addresses).get(&found.device_id).cloned().unwrap_or_default())
}

pub fn links(client: &MockLibreNmsClient, device: &DeviceRef) -> Option<Vec<Link>> {
    let found = find(client, device)?;
    lock(&client.links).get(&found.device_id).filter(|l| !l.is_empty()).cloned()
}
