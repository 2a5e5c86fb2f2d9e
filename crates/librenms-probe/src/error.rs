//! Probe-specific error types.
//!
//! Wraps the client errors the probe can hit and maps them onto process exit codes.

use librenms_client::LibreNmsError;
use std::process::ExitCode;
use thiserror::Error;

/// Errors that can occur while probing a LibreNMS device.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Missing or malformed command line argument
    #[error("Usage: librenms-probe <hostname|device_id> [--ports]: {0}")]
    Usage(String),

    /// LibreNMS API error
    #[error("LibreNMS error: {0}")]
    LibreNms(#[from] LibreNmsError),

    /// Output could not be rendered
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl ProbeError {
    /// Exit status for this failure
    ///
    /// `2` for usage errors, `3` when the device does not exist,
    /// `4` when the token is rejected, `1` for everything else.
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::LibreNms(LibreNmsError::DeviceNotFound(_)) => 3,
            Self::LibreNms(e) if matches!(e.status(), Some(401 | 403)) => 4,
            _ => 1,
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}
