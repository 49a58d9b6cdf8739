//! Persistence for task items and statuses.
//!
//! The store traits are the only seam the services and validators see. Two
//! implementations exist: [`SqliteStore`] backs the versioned API and the
//! health checks, [`InMemoryTaskItemStore`] backs the legacy task item routes.

/// Process-lifetime in-memory task item store.
pub mod memory;
/// Table creation and seed data.
pub mod schema;
/// `SQLite` implementation of both stores.
pub mod sqlite;

pub use memory::InMemoryTaskItemStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::domain::{Status, StatusId, TaskItem, TaskItemId};

/// Errors that can occur when using a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database-related error.
    #[error("Database Error: {0}")]
    DbError(#[from] sqlx::Error),
    /// A write collided with a unique constraint.
    #[error("{entity} with this {field} already exists")]
    Conflict {
        /// Entity kind.
        entity: &'static str,
        /// Field the constraint covers.
        field: &'static str,
    },
    /// The row targeted by an update does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind.
        entity: &'static str,
        /// Raw id that was looked up.
        id: i64,
    },
}

/// CRUD operations over task items.
#[async_trait]
pub trait TaskItemStore: Send + Sync {
    /// Returns every task item ordered by id.
    async fn list(&self) -> Result<Vec<TaskItem>, StoreError>;

    /// Fetches one task item.
    async fn get(&self, id: TaskItemId) -> Result<Option<TaskItem>, StoreError>;

    /// Inserts `item`, ignoring its id, and returns the stored instance.
    async fn create(&self, item: &TaskItem) -> Result<TaskItem, StoreError>;

    /// Replaces every mutable field of the row `item.id` and returns the stored instance.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the row does not exist.
    async fn update(&self, item: &TaskItem) -> Result<TaskItem, StoreError>;

    /// Removes a task item. Returns `false` when there was nothing to remove.
    async fn delete(&self, id: TaskItemId) -> Result<bool, StoreError>;
}

/// CRUD operations over statuses plus the lookups validation needs.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Returns every status ordered by id.
    async fn list(&self) -> Result<Vec<Status>, StoreError>;

    /// Fetches one status.
    async fn get(&self, id: StatusId) -> Result<Option<Status>, StoreError>;

    /// Inserts `status`, ignoring its id, and returns the stored instance.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when another status already has the name.
    async fn create(&self, status: &Status) -> Result<Status, StoreError>;

    /// Replaces every mutable field of the row `status.id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the row does not exist and
    /// [`StoreError::Conflict`] when another status already has the name.
    async fn update(&self, status: &Status) -> Result<Status, StoreError>;

    /// Removes a status. Returns `false` when there was nothing to remove.
    async fn delete(&self, id: StatusId) -> Result<bool, StoreError>;

    /// Whether a status with this id exists.
    async fn exists(&self, id: StatusId) -> Result<bool, StoreError>;

    /// Whether a status other than `excluding` already uses `name`.
    async fn name_taken(&self, name: &str, excluding: StatusId) -> Result<bool, StoreError>;

    /// Round-trips to the backing store.
    async fn ping(&self) -> Result<(), StoreError>;
}
