//! Location endpoints (`/locations`, `/resources/locations`)
//!
//! See: https://docs.librenms.org/API/Locations/

use crate::client::LibreNmsClient;
use crate::error::LibreNmsError;
use crate::models::{Location, LocationRequest, LocationUpdate};
use tracing::info;

impl LibreNmsClient {
    /// Add a location
    ///
    /// # Returns
    /// * `Ok(Some(String))` - The backend confirmation message
    /// * `Ok(None)` - The backend accepted the request without a message
    /// * `Err(LibreNmsError)` - If the request fails, e.g. the location already exists
    pub async fn add_location(
        &self,
        request: &LocationRequest,
    ) -> Result<Option<String>, LibreNmsError> {
        let body = serde_json::to_value(request)?;
        let envelope = self.transport.post(&self.url("/locations"), Some(&body)).await?;
        info!("Added location {}", request.location);
        Ok(envelope.message())
    }

    /// Get a location by name
    pub async fn get_location(&self, name: &str) -> Result<Option<Location>, LibreNmsError> {
        let url = self.url(&format!("/location/{}", urlencoding::encode(name)));
        let envelope = match self.transport.get(&url).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        envelope.field("get_location")
    }

    /// Every location known to LibreNMS
    pub async fn list_locations(&self) -> Result<Option<Vec<Location>>, LibreNmsError> {
        self.transport
            .get(&self.url("/resources/locations"))
            .await?
            .field("locations")
    }

    /// Delete a location by name
    ///
    /// # Returns
    /// * `Ok(Some(String))` - The backend confirmation message
    /// * `Ok(None)` - Unknown location
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn delete_location(&self, name: &str) -> Result<Option<String>, LibreNmsError> {
        let url = self.url(&format!("/locations/{}", urlencoding::encode(name)));
        let envelope = match self.transport.delete(&url).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        info!("Deleted location {}", name);
        Ok(envelope.message())
    }

    /// Edit a location
    ///
    /// An empty update is rejected without sending anything. Returns `false`
    /// when the location does not exist.
    pub async fn edit_location(
        &self,
        name: &str,
        update: &LocationUpdate,
    ) -> Result<bool, LibreNmsError> {
        if update.is_empty() {
            return Err(LibreNmsError::InvalidRequest(
                "No location fields to update".to_string(),
            ));
        }

        let body = serde_json::to_value(update)?;
        let url = self.url(&format!("/locations/{}", urlencoding::encode(name)));
        match self.transport.patch(&url, Some(&body)).await {
            Ok(envelope) => Ok(envelope.code == 200),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
