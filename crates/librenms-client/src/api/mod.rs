//! Resource endpoints
//!
//! Each file adds inherent methods to [`LibreNmsClient`](crate::LibreNmsClient)
//! for one area of the API. Device-scoped calls resolve the device first and
//! report a missing device as `None`/`false` rather than as an error.

mod alerts;
pub(crate) mod devices;
mod graphs;
mod locations;
mod logs;
mod ports;
mod sensors;
mod system;
