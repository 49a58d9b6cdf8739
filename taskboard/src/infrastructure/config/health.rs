//! Health check configuration for the service.

use serde::Deserialize;

/// Health check thresholds.
#[derive(Debug, Deserialize, Clone)]
pub struct HealthSettings {
    /// Database round trips slower than this report `Degraded`.
    #[serde(default = "default_degraded_threshold_ms")]
    pub degraded_threshold_ms: u64,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            degraded_threshold_ms: default_degraded_threshold_ms(),
        }
    }
}

pub(super) fn default_degraded_threshold_ms() -> u64 {
    250
}
