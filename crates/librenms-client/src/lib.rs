//! LibreNMS REST API Client
//!
//! A Rust client library for the LibreNMS v0 REST API.
//! Provides the authenticated request layer, response envelope parsing with
//! uniform failure classification, and a shared device resolution cache.
//!
//! # Example
//!
//! ```no_run
//! use librenms_client::{ClientConfig, LibreNmsClient, MaintenanceRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = LibreNmsClient::from_config(&ClientConfig::new(
//!     "https://librenms.example.com",
//!     "your-api-token",
//! ))?;
//!
//! // Resolve a device; the record is cached by id and hostname
//! let device = client.resolve_device("sw1.example.com").await?;
//!
//! // Later calls by either key skip the listing
//! let ports = client.device_ports(device.device_id, None).await?;
//!
//! // Put the device into maintenance for two hours
//! let request = MaintenanceRequest::for_duration(chrono::Duration::hours(2))
//!     .with_title("Firmware upgrade");
//! client.maintenance_device("sw1.example.com", &request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Failure classification**: transport, HTTP status and backend `status: error`
//!   failures surface as distinct [`LibreNmsError`] variants
//! - **Device resolution**: hostname/id lookups answered from a shared cache,
//!   with at most one listing call per miss
//! - **Graphs**: PNG responses exposed as [`Image`] payloads
//! - **Resources**: devices, ports, alerts, locations, logs and sensors

mod api;
pub mod cache;
pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
#[path = "trait.rs"]
pub mod librenms_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use cache::{Cache, DeviceCache};
pub use client::LibreNmsClient;
pub use common::{
    build_url, Headers, HttpBackend, HttpRequest, Image, Method, RawResponse, ReqwestBackend,
    ResponseEnvelope, Transport,
};
pub use config::ClientConfig;
pub use error::{LibreNmsError, TransportErrorKind};
pub use models::*;
pub use resolver::DeviceResolver;
pub use librenms_trait::LibreNmsClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockLibreNmsClient;
