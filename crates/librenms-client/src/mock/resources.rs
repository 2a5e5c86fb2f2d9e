//! Alert, location, log and sensor operations for MockLibreNmsClient

use super::{MockLibreNmsClient, devices, lock};
use crate::error::LibreNmsError;
use crate::models::*;

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

// Alerts

pub fn list_alerts(client: &MockLibreNmsClient, filter: &AlertFilter) -> Option<Vec<Alert>> {
    let mut matched: Vec<Alert> = lock(&client.alerts)
        .values()
        .filter(|a| filter.state.is_none_or(|s| a.state == Some(u64::from(s.code()))))
        .filter(|a| filter.severity.is_none_or(|s| a.severity.as_deref() == Some(s.as_str())))
        .filter(|a| filter.alert_rule.is_none_or(|r| a.rule_id == Some(r)))
        .cloned()
        .collect();

    matched.sort_by_key(|a| a.id);
    match filter.order {
        Some(SortOrder::Asc) => matched.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        Some(SortOrder::Desc) => matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        None => {}
    }
    non_empty(matched)
}

pub fn set_alert_state(client: &MockLibreNmsClient, id: u64, state: AlertState) -> bool {
    match lock(&client.alerts).get_mut(&id) {
        Some(alert) => {
            alert.state = Some(u64::from(state.code()));
            true
        }
        None => false,
    }
}

// Locations

pub fn add_location(client: &MockLibreNmsClient, request: &LocationRequest) -> Result<Option<String>, LibreNmsError> {
    let mut locations = lock(&client.locations);
    if locations.contains_key(&request.location) {
        return Err(LibreNmsError::Backend {
            status: 200,
            message: format!("Location {} already exists", request.location),
        });
    }

    let id = client.next_id();
    locations.insert(
        request.location.clone(),
        Location {
            id: Some(id),
            location: request.location.clone(),
            lat: Some(request.lat),
            lng: Some(request.lng),
            fixed_coordinates: Some(request.fixed_coordinates),
            timestamp: None,
            extra: serde_json::Map::new(),
        },
    );
    Ok(Some(format!("Location added with id #{id}")))
}

pub fn list_locations(client: &MockLibreNmsClient) -> Vec<Location> {
    let mut all: Vec<Location> = lock(&client.locations).values().cloned().collect();
    all.sort_by_key(|l| l.id);
    all
}

pub fn edit_location(client: &MockLibreNmsClient, name: &str, update: &LocationUpdate) -> Result<bool, LibreNmsError> {
    if update.is_empty() {
        return Err(LibreNmsError::InvalidRequest("No location fields to update".to_string()));
    }

    let mut locations = lock(&client.locations);
    let Some(mut location) = locations.remove(name) else {
        return Ok(false);
    };
    if let Some(new_name) = &update.location {
        location.location.clone_from(new_name);
    }
    if update.lat.is_some() {
        location.lat = update.lat;
    }
    if update.lng.is_some() {
        location.lng = update.lng;
    }
    if update.fixed_coordinates.is_some() {
        location.fixed_coordinates = update.fixed_coordinates;
    }
    locations.insert(location.location.clone(), location);
    Ok(true)
}

// Logs

pub fn device_logs(client: &MockLibreNmsClient, device: &DeviceRef, kind: LogKind, query: &LogQuery) -> Option<Vec<LogEntry>> {
    let found = devices::find(client, device)?;
    let entries = lock(&client.logs).get(&(found.device_id, kind)).cloned().unwrap_or_default();

    let start = query.start.map_or(0, |s| usize::try_from(s).unwrap_or(usize::MAX));
    let limit = query.limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
    non_empty(entries.into_iter().skip(start).take(limit).collect())
}

// Sensors

pub fn sensors(client: &MockLibreNmsClient, keep: impl Fn(&Sensor) -> bool) -> Option<Vec<Sensor>> {
    let mut matched: Vec<Sensor> = lock(&client.sensors).values().filter(|s| keep(s)).cloned().collect();
    matched.sort_by_key(|s| s.sensor_id);
    non_empty(matched)
}
