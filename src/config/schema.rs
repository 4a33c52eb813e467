//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Defaults match the fixed local API contract, so an empty file is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::request::LOCALAPI_NAMESPACE;

/// Deadline for a single dispatch.
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;

/// First status code treated as a failure.
pub const DEFAULT_BAD_STATUS_THRESHOLD: u16 = 300;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LocalApiConfig {
    /// Dispatch settings.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Dispatch settings, fixed for the lifetime of a client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix joined to every dispatched path.
    pub namespace: String,

    /// Deadline in milliseconds.
    pub timeout_ms: u64,

    /// Statuses at or above this are reported as bad.
    pub bad_status_threshold: u16,
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            namespace: LOCALAPI_NAMESPACE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            bad_status_threshold: DEFAULT_BAD_STATUS_THRESHOLD,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record dispatch counters and latency histograms.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}
