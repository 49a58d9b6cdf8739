//! Telemetry configuration for the service.
//!
//! This module defines logging settings.

use serde::Deserialize;

/// Telemetry configuration settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// Service name attached to startup logs.
    pub service_name: String,
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default = "default_json")]
    pub json: bool,
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_json() -> bool {
    true
}
