//! Configuration management for the service.
//!
//! Settings are layered: built-in defaults, then an optional `taskboard`
//! config file (any format the `config` crate understands), then environment
//! variables prefixed with `TASKBOARD` using `__` as the section separator
//! (for example `TASKBOARD__SERVER__PORT=9000`).
//!
//! # Example
//!
//! ```no_run
//! use taskboard::infrastructure::config::Settings;
//!
//! let settings = Settings::new().expect("Failed to load configuration");
//! ```

pub mod database;
pub mod health;
pub mod server;
pub mod telemetry;

pub use database::DatabaseSettings;
pub use health::HealthSettings;
pub use server::ServerSettings;
pub use telemetry::TelemetrySettings;

use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

/// Top-level configuration for the service.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Server settings.
    pub server: ServerSettings,
    /// Telemetry settings.
    pub telemetry: TelemetrySettings,
    /// Database settings.
    pub database: DatabaseSettings,
    /// Health check settings.
    #[serde(default)]
    pub health: HealthSettings,
}

impl Settings {
    /// Creates a new settings instance from defaults, the optional config
    /// file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn new() -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name("taskboard").required(false))
            .add_source(Environment::with_prefix("TASKBOARD").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Builder pre-loaded with the default values only.
    ///
    /// # Errors
    ///
    /// Returns an error if a default cannot be set.
    pub fn defaults() -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite://taskboard.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("database.seed_statuses", true)?
            .set_default("telemetry.service_name", "taskboard")?
            .set_default("telemetry.log_level", "info")?
            .set_default("telemetry.json", true)?
            .set_default("health.degraded_threshold_ms", 250)
    }

    /// Address string the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> BindAddress {
        BindAddress(self.server.host.clone(), self.server.port)
    }
}

/// Helper for strong typing addresses
pub struct BindAddress(pub String, pub u16);

impl BindAddress {
    /// Converts the bind address to a `SocketAddr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the IP address string cannot be parsed.
    pub fn to_socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        let ip = self
            .0
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid IP address '{}': {e}", self.0))?;
        Ok(std::net::SocketAddr::new(ip, self.1))
    }
}
