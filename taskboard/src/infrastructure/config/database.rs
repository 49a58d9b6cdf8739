//! Database configuration for the service.
//!
//! This module defines database connection settings.

use secrecy::SecretString;
use serde::Deserialize;

/// Database connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Database connection URL.
    pub url: SecretString,
    /// Pool size for file-backed databases. In-memory databases always use one connection.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Whether to insert the default statuses into an empty database.
    #[serde(default = "default_seed_statuses")]
    pub seed_statuses: bool,
}

pub(super) fn default_max_connections() -> u32 {
    5
}

pub(super) fn default_seed_statuses() -> bool {
    true
}
