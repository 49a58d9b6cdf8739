//! Built-in health checks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;

use super::{CheckResult, HealthCheck, LIVENESS, READINESS};
use crate::store::StatusStore;

/// Round-trips to the database through the status store.
///
/// Reports `Degraded` when the round trip is slower than the threshold and
/// fails (so `Unhealthy`) when the store errors.
pub struct DatabaseCheck {
    store: Arc<dyn StatusStore>,
    degraded_threshold: Duration,
}

impl DatabaseCheck {
    /// Creates the check.
    #[must_use]
    pub fn new(store: Arc<dyn StatusStore>, degraded_threshold: Duration) -> Self {
        Self {
            store,
            degraded_threshold,
        }
    }
}

#[async_trait]
impl HealthCheck for DatabaseCheck {
    fn name(&self) -> &str {
        "database"
    }

    fn tags(&self) -> &[&'static str] {
        &[READINESS]
    }

    async fn check(&self) -> anyhow::Result<CheckResult> {
        let started = Instant::now();
        self.store
            .ping()
            .await
            .context("Database is unreachable")?;
        let latency = started.elapsed();
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);

        let result = if latency > self.degraded_threshold {
            CheckResult::degraded(format!(
                "Database responded slower than {}ms.",
                self.degraded_threshold.as_millis()
            ))
        } else {
            CheckResult::healthy("Database is reachable.")
        };
        Ok(result.with_data("latencyMs", latency_ms))
    }
}

/// Reports that the process is responsive. Never touches external systems.
pub struct SelfCheck {
    started: Instant,
}

impl SelfCheck {
    /// Creates the check, measuring uptime from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SelfCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthCheck for SelfCheck {
    fn name(&self) -> &str {
        "self"
    }

    fn tags(&self) -> &[&'static str] {
        &[LIVENESS]
    }

    async fn check(&self) -> anyhow::Result<CheckResult> {
        Ok(CheckResult::healthy("Service is responsive.")
            .with_data("uptimeSeconds", self.started.elapsed().as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{CheckFilter, HealthRegistry, HealthStatus};
    use crate::infrastructure::config::DatabaseSettings;
    use crate::store::SqliteStore;
    use secrecy::SecretString;

    async fn store() -> SqliteStore {
        SqliteStore::connect(&DatabaseSettings {
            url: SecretString::from("sqlite::memory:"),
            max_connections: 1,
            seed_statuses: false,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_database_check_healthy() {
        let check = DatabaseCheck::new(Arc::new(store().await), Duration::from_secs(5));

        let result = check.check().await.unwrap();
        assert_eq!(result.status, HealthStatus::Healthy);
        assert!(result.data.contains_key("latencyMs"));
    }

    #[tokio::test]
    async fn test_database_check_degraded_over_threshold() {
        let check = DatabaseCheck::new(Arc::new(store().await), Duration::ZERO);

        let result = check.check().await.unwrap();
        assert_eq!(result.status, HealthStatus::Degraded);
    }

    #[tokio::test]
    async fn test_database_check_unhealthy_when_closed() {
        let store = store().await;
        store.pool().close().await;
        let registry = HealthRegistry::new()
            .with_check(DatabaseCheck::new(Arc::new(store), Duration::from_secs(5)));

        let report = registry.run(CheckFilter::All).await;

        let entry = &report.entries[0];
        assert_eq!(entry.status, HealthStatus::Unhealthy);
        assert_eq!(entry.description.as_deref(), Some("Database is unreachable"));
        assert!(entry.error.as_deref().unwrap().starts_with("Database is unreachable: "));
    }

    #[tokio::test]
    async fn test_self_check_is_liveness_only() {
        let check = SelfCheck::new();
        assert_eq!(check.tags(), &[LIVENESS]);
        assert_eq!(check.check().await.unwrap().status, HealthStatus::Healthy);
    }
}
