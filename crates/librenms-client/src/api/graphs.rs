//! Graph endpoints
//!
//! Graph endpoints answer with `image/png` bodies, surfaced as
//! [`Image`] payloads.
//! See: https://docs.librenms.org/API/Devices/#get_graph_by_port_hostname

use crate::client::LibreNmsClient;
use crate::common::Image;
use crate::error::LibreNmsError;
use crate::models::{DEFAULT_PORT_GRAPH_TYPE, DeviceRef, PortGraph};
use tracing::debug;

/// Backend message for ports without RRD data
const NO_DATA_MARKER: &str = "No Data";

impl LibreNmsClient {
    /// Device-level graph, e.g. `device_processor` or `device_ping_perf`
    ///
    /// # Returns
    /// * `Ok(Some(Image))` - The rendered graph
    /// * `Ok(None)` - Unknown device, or the backend returned no image
    /// * `Err(LibreNmsError)` - If the request fails
    pub async fn device_graph(
        &self,
        device: impl Into<DeviceRef>,
        graph_type: &str,
    ) -> Result<Option<Image>, LibreNmsError> {
        let Some(found) = self.find_device(&device.into()).await? else {
            return Ok(None);
        };

        let url = self.url(&format!(
            "/devices/{}/{}",
            found.device_id,
            urlencoding::encode(graph_type)
        ));
        Ok(self.transport.get(&url).await?.image)
    }

    /// Per-port graphs of a device
    ///
    /// # Arguments
    /// * `device` - Hostname or id
    /// * `interfaces` - Interface names to graph; all device ports when `None`
    /// * `graph_type` - Graph type; `port_bits` when `None`
    ///
    /// Ports the backend has no data for are skipped. Any other failure
    /// aborts the whole call.
    ///
    /// # Returns
    /// * `Ok(Some(Vec<PortGraph>))` - One entry per graphed interface, in request order
    /// * `Ok(None)` - Unknown device, no ports, or no graph could be produced
    /// * `Err(LibreNmsError)` - If a request fails
    pub async fn device_port_graphs(
        &self,
        device: impl Into<DeviceRef>,
        interfaces: Option<&[&str]>,
        graph_type: Option<&str>,
    ) -> Result<Option<Vec<PortGraph>>, LibreNmsError> {
        let graph_type = graph_type.unwrap_or(DEFAULT_PORT_GRAPH_TYPE);
        let Some(found) = self.find_device(&device.into()).await? else {
            return Ok(None);
        };

        let if_names: Vec<String> = match interfaces {
            Some(names) => names.iter().map(|n| (*n).to_string()).collect(),
            None => match self
                .device_ports(found.device_id, Some("ifName"))
                .await?
            {
                Some(ports) => ports.into_iter().filter_map(|p| p.ifName).collect(),
                None => return Ok(None),
            },
        };

        let mut graphs = Vec::new();
        for if_name in if_names {
            let url = self.url(&format!(
                "/devices/{}/ports/{}/{}",
                urlencoding::encode(&found.hostname),
                urlencoding::encode(&if_name),
                urlencoding::encode(graph_type)
            ));

            match self.transport.get(&url).await {
                Ok(envelope) => {
                    if let Some(image) = envelope.image {
                        graphs.push(PortGraph { if_name, image });
                    }
                }
                Err(e) if e.message().contains(NO_DATA_MARKER) => {
                    debug!("No graph data for {} on {}", if_name, found.hostname);
                }
                Err(e) => return Err(e),
            }
        }

        Ok((!graphs.is_empty()).then_some(graphs))
    }
}
