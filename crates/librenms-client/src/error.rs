//! LibreNMS client errors

use std::fmt;
use thiserror::Error;

/// Class of failure raised before any HTTP response existed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// DNS lookup of the backend host failed
    ResolveHost,
    /// TCP/TLS connection could not be established
    Connect,
    /// Connect timeout elapsed
    Timeout,
    /// Request URL could not be parsed
    MalformedUrl,
    /// Anything the transport could not classify
    Other,
}

impl TransportErrorKind {
    /// Fixed message for this failure class
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::ResolveHost => "Could not resolve host",
            Self::Connect => "Could not connect",
            Self::Timeout => "Operation timed out",
            Self::MalformedUrl => "URL malformed",
            Self::Other => "Unknown transport error occurred",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors that can occur when interacting with the LibreNMS API
#[derive(Debug, Error)]
pub enum LibreNmsError {
    /// The exchange never produced an HTTP response (DNS, connect, timeout, bad URL)
    #[error("{kind}: {detail}")]
    Transport {
        /// Failure class
        kind: TransportErrorKind,
        /// Underlying transport detail
        detail: String,
    },

    /// HTTP status outside 200-299
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Backend `message` field, or a generic hint
        message: String,
    },

    /// Success status, but the body reported `"status": "error"`
    #[error("LibreNMS API error: {message}")]
    Backend {
        /// HTTP status code (in the success range)
        status: u16,
        /// Backend `message` field, or a generic hint
        message: String,
    },

    /// No device matched a hostname or id
    #[error("Device does not exist: {0}")]
    DeviceNotFound(String),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON serialization of a request payload failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client configuration is incomplete or invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl LibreNmsError {
    /// Build a transport error from a failure class and detail text
    pub fn transport(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            detail: detail.into(),
        }
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for missing devices and HTTP 404 responses
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotFound(_) | Self::Http { status: 404, .. }
        )
    }

    /// Message as reported by the backend or the transport, without the prefix
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Transport { kind, .. } => kind.message().to_string(),
            Self::Http { message, .. } | Self::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
