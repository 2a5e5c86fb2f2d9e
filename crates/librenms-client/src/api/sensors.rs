//! Sensor endpoints (`/resources/sensors`)
//!
//! LibreNMS only lists sensors for the whole install, so the listing is kept
//! on the client and filtered locally. Pass `force` to refetch it.
//! See: https://docs.librenms.org/API/Sensors/

use crate::client::LibreNmsClient;
use crate::error::LibreNmsError;
use crate::models::{DeviceRef, Sensor};
use tracing::debug;

const SENSOR_LISTING_KEY: &str = "sensors";

impl LibreNmsClient {
    /// Every sensor known to LibreNMS
    ///
    /// # Returns
    /// * `Ok(Some(Vec<Sensor>))` - The listing, from memory unless `force` is set
    /// * `Ok(None)` - LibreNMS has no sensors
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn list_sensors(&self, force: bool) -> Result<Option<Vec<Sensor>>, LibreNmsError> {
        if !force {
            if let Some(cached) = self.sensors.get(SENSOR_LISTING_KEY) {
                return Ok(Some(cached));
            }
        }

        let sensors = self
            .transport
            .get(&self.url("/resources/sensors"))
            .await?
            .non_empty_list::<Sensor>("sensors")?;

        match &sensors {
            Some(list) => {
                debug!("Cached {} sensor(s)", list.len());
                self.sensors.set(SENSOR_LISTING_KEY, list.clone());
            }
            None => {
                self.sensors.delete(SENSOR_LISTING_KEY);
            }
        }
        Ok(sensors)
    }

    /// Sensors of one device
    ///
    /// `None` for an unknown device or a device without sensors.
    pub async fn device_sensors(
        &self,
        device: impl Into<DeviceRef>,
        force: bool,
    ) -> Result<Option<Vec<Sensor>>, LibreNmsError> {
        let Some(found) = self.find_device(&device.into()).await? else {
            return Ok(None);
        };

        let sensors = self.list_sensors(force).await?.unwrap_or_default();
        let own: Vec<Sensor> = sensors
            .into_iter()
            .filter(|s| s.device_id == Some(found.device_id))
            .collect();
        Ok((!own.is_empty()).then_some(own))
    }

    /// Active sensors of one class (e.g. `temperature`) across all devices
    pub async fn sensors_by_class(
        &self,
        class: &str,
        force: bool,
    ) -> Result<Option<Vec<Sensor>>, LibreNmsError> {
        let sensors = self.list_sensors(force).await?.unwrap_or_default();
        let matched: Vec<Sensor> = sensors
            .into_iter()
            .filter(|s| s.is_active() && s.sensor_class.as_deref() == Some(class))
            .collect();
        Ok((!matched.is_empty()).then_some(matched))
    }
}
