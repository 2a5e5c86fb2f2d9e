//! Port endpoints (`/ports`, `/devices/{id}/ports`)
//!
//! See: https://docs.librenms.org/API/Ports/

use crate::client::LibreNmsClient;
use crate::error::LibreNmsError;
use crate::models::{DEFAULT_DEVICE_PORT_COLUMNS, DEFAULT_PORT_COLUMNS, DeviceRef, Port};

impl LibreNmsClient {
    /// Ports of one device
    ///
    /// # Arguments
    /// * `device` - Hostname or id
    /// * `columns` - Comma-separated column list; defaults to the common IF-MIB set
    ///
    /// # Returns
    /// * `Ok(Some(Vec<Port>))` - The device's ports
    /// * `Ok(None)` - Unknown device, or no ports
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn device_ports(
        &self,
        device: impl Into<DeviceRef>,
        columns: Option<&str>,
    ) -> Result<Option<Vec<Port>>, LibreNmsError> {
        let Some(found) = self.find_device(&device.into()).await? else {
            return Ok(None);
        };

        let columns = urlencoding::encode(columns.unwrap_or(DEFAULT_DEVICE_PORT_COLUMNS));
        let url = self.url(&format!(
            "/devices/{}/ports?columns={columns}",
            found.device_id
        ));
        self.transport.get(&url).await?.non_empty_list("ports")
    }

    /// Get a port by id
    pub async fn get_port(&self, port_id: u64) -> Result<Option<Port>, LibreNmsError> {
        let url = self.url(&format!("/ports/{port_id}"));
        let envelope = match self.transport.get(&url).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        let ports: Option<Vec<Port>> = envelope.field("port")?;
        Ok(ports.and_then(|p| p.into_iter().next()))
    }

    /// Every port known to LibreNMS
    pub async fn list_ports(&self) -> Result<Option<Vec<Port>>, LibreNmsError> {
        let url = self.url(&format!(
            "/ports?columns={}",
            urlencoding::encode(DEFAULT_PORT_COLUMNS)
        ));
        self.transport.get(&url).await?.field("ports")
    }
}
