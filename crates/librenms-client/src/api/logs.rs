//! Log endpoints (`/logs/{alertlog,authlog,eventlog,syslog}`)
//!
//! See: https://docs.librenms.org/API/Logs/

use crate::client::LibreNmsClient;
use crate::common::query::with_params;
use crate::error::LibreNmsError;
use crate::models::{DeviceRef, LogEntry, LogKind, LogQuery};

impl LibreNmsClient {
    /// Log entries of one device
    ///
    /// # Returns
    /// * `Ok(Some(Vec<LogEntry>))` - The entries, newest first as LibreNMS sorts them
    /// * `Ok(None)` - Unknown device, or no entries
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn device_logs(
        &self,
        device: impl Into<DeviceRef>,
        kind: LogKind,
        query: &LogQuery,
    ) -> Result<Option<Vec<LogEntry>>, LibreNmsError> {
        let Some(found) = self.find_device(&device.into()).await? else {
            return Ok(None);
        };

        let url = with_params(
            self.url(&format!("/logs/{kind}/{}", found.device_id)),
            &query.query_params(),
        );
        self.transport.get(&url).await?.non_empty_list("logs")
    }

    /// Alert log of a device
    pub async fn device_alerts(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Option<Vec<LogEntry>>, LibreNmsError> {
        self.device_logs(device, LogKind::Alert, &LogQuery::default())
            .await
    }

    /// Event log of a device
    pub async fn device_events(
        &self,
        device: impl Into<DeviceRef>,
    ) -> Result<Option<Vec<LogEntry>>, LibreNmsError> {
        self.device_logs(device, LogKind::Event, &LogQuery::default())
            .await
    }
}
