//! System endpoints
//!
//! See: https://docs.librenms.org/API/System/

use crate::client::LibreNmsClient;
use crate::error::LibreNmsError;
use crate::models::SystemInfo;
use serde_json::{Map, Value};
use tracing::debug;

impl LibreNmsClient {
    /// Validate the API token and connectivity
    ///
    /// Uses `/system` as it's lightweight and requires authentication.
    ///
    /// # Returns
    /// * `Ok(())` - Token accepted
    /// * `Err(LibreNmsError::Http)` - 401/403 when the token is rejected
    /// * `Err(LibreNmsError)` - Any other failure
    pub async fn validate_token(&self) -> Result<(), LibreNmsError> {
        debug!("Validating LibreNMS token and connectivity");
        self.transport.get(&self.url("/system")).await?;
        Ok(())
    }

    /// LibreNMS version information
    ///
    /// Also a cheap way to check connectivity and token validity.
    pub async fn system_info(&self) -> Result<Option<SystemInfo>, LibreNmsError> {
        let envelope = self.transport.get(&self.url("/system")).await?;
        let entries: Option<Vec<SystemInfo>> = envelope.field("system")?;
        Ok(entries.and_then(|e| e.into_iter().next()))
    }

    /// Map of API route names to URLs, as listed at the API root
    pub async fn endpoints(&self) -> Result<Option<Map<String, Value>>, LibreNmsError> {
        let envelope = self.transport.get(&self.url("")).await?;
        if envelope.code != 200 {
            return Ok(None);
        }
        Ok(Some(envelope.fields))
    }
}
