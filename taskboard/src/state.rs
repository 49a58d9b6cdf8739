//! Shared application state handed to every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::health::{DatabaseCheck, HealthRegistry, SelfCheck};
use crate::infrastructure::config::{HealthSettings, Settings};
use crate::service::{StatusService, TaskItemService};
use crate::store::{InMemoryTaskItemStore, SqliteStore, StatusStore, StoreError, TaskItemStore};

/// Services and checks behind the HTTP surface.
///
/// Every field is cheap to clone; handlers receive their own copy.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Task items for the v1 routes, backed by `SQLite`.
    pub task_items: TaskItemService,
    /// Task items for the legacy routes, backed by process memory.
    pub legacy_task_items: TaskItemService,
    /// Statuses, backed by `SQLite`.
    pub statuses: StatusService,
    /// Registered health checks.
    pub health: Arc<HealthRegistry>,
}

impl AppState {
    /// Connects the database from settings and wires every service.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or its schema created.
    pub async fn from_settings(settings: &Settings) -> Result<Self, StoreError> {
        let store = SqliteStore::connect(&settings.database).await?;
        Ok(Self::new(store, &settings.health))
    }

    /// Wires every service over an open store.
    ///
    /// Both API versions validate against the same statuses; only task item
    /// storage differs between them.
    #[must_use]
    pub fn new(store: SqliteStore, health: &HealthSettings) -> Self {
        let store = Arc::new(store);
        let statuses: Arc<dyn StatusStore> = store.clone();
        let task_items: Arc<dyn TaskItemStore> = store;
        let legacy_items: Arc<dyn TaskItemStore> = Arc::new(InMemoryTaskItemStore::new());

        let registry = HealthRegistry::new()
            .with_check(DatabaseCheck::new(
                statuses.clone(),
                Duration::from_millis(health.degraded_threshold_ms),
            ))
            .with_check(SelfCheck::new());

        Self {
            task_items: TaskItemService::new(task_items, statuses.clone()),
            legacy_task_items: TaskItemService::new(legacy_items, statuses.clone()),
            statuses: StatusService::new(statuses),
            health: Arc::new(registry),
        }
    }

    /// Replaces the registered health checks.
    #[must_use]
    pub fn with_health(mut self, registry: HealthRegistry) -> Self {
        self.health = Arc::new(registry);
        self
    }
}
