//! Alert endpoints (`/alerts`)
//!
//! See: https://docs.librenms.org/API/Alerts/

use crate::client::LibreNmsClient;
use crate::common::query::with_params;
use crate::error::LibreNmsError;
use crate::models::{Alert, AlertFilter, AlertState};
use std::collections::BTreeMap;
use tracing::{debug, info};

impl LibreNmsClient {
    /// Get an alert by id
    ///
    /// LibreNMS only answers `/alerts/{id}` for some states, so an empty
    /// answer falls back to searching every state.
    ///
    /// # Returns
    /// * `Ok(Some(Alert))` - The alert if found
    /// * `Ok(None)` - If no alert found
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn get_alert(&self, id: u64) -> Result<Option<Alert>, LibreNmsError> {
        let url = self.url(&format!("/alerts/{id}"));
        let envelope = match self.transport.get(&url).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };

        if !envelope.contains("alerts") {
            return Ok(None);
        }
        if let Some(alerts) = envelope.non_empty_list::<Alert>("alerts")? {
            return Ok(alerts.into_iter().next());
        }

        debug!("Alert {} not returned directly, searching all states", id);
        Ok(self
            .all_alerts()
            .await?
            .and_then(|alerts| alerts.into_iter().find(|a| a.id == id)))
    }

    /// Acknowledge an alert
    ///
    /// Returns `false` for an unknown alert.
    pub async fn acknowledge_alert(&self, id: u64) -> Result<bool, LibreNmsError> {
        self.put_alert(&format!("/alerts/{id}")).await
    }

    /// Unmute an acknowledged alert
    ///
    /// Returns `false` for an unknown alert.
    pub async fn unmute_alert(&self, id: u64) -> Result<bool, LibreNmsError> {
        self.put_alert(&format!("/alerts/unmute/{id}")).await
    }

    /// List alerts matching a filter
    ///
    /// # Returns
    /// * `Ok(Some(Vec<Alert>))` - Matching alerts, in backend order
    /// * `Ok(None)` - Nothing matched
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn list_alerts(
        &self,
        filter: &AlertFilter,
    ) -> Result<Option<Vec<Alert>>, LibreNmsError> {
        let url = with_params(self.url("/alerts"), &filter.query_params());
        self.transport.get(&url).await?.non_empty_list("alerts")
    }

    /// Alerts in any state, ordered by id
    ///
    /// One listing per state; an alert seen in several states keeps the
    /// record of the last one.
    pub async fn all_alerts(&self) -> Result<Option<Vec<Alert>>, LibreNmsError> {
        let mut merged = BTreeMap::new();
        for state in AlertState::ALL {
            let alerts = self.list_alerts(&AlertFilter::in_state(state)).await?;
            for alert in alerts.into_iter().flatten() {
                merged.insert(alert.id, alert);
            }
        }

        if merged.is_empty() {
            return Ok(None);
        }
        Ok(Some(merged.into_values().collect()))
    }

    async fn put_alert(&self, path: &str) -> Result<bool, LibreNmsError> {
        let envelope = match self.transport.put(&self.url(path), None).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_not_found() => return Ok(false),
            Err(e) => return Err(e),
        };
        info!("Updated alert via {}", path);
        Ok(envelope.code == 200)
    }
}
