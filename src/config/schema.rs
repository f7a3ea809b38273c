//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, with
//! defaults that bring the demo up without any file at all.

use serde::{Deserialize, Serialize};

/// Root configuration for the availability service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log level (trace, debug, info, warn, error); `RUST_LOG`
    /// overrides it.
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Scrape endpoint bind address.
    pub metrics_address: String,

    /// Logical application name grouping service and load driver telemetry.
    /// Both processes must agree on this value to be correlated together.
    pub app_name: String,

    /// Per-process source identifier (host name, pod name, ...).
    pub instance_id: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
            app_name: "console-availability".to_string(),
            instance_id: "local".to_string(),
        }
    }
}
