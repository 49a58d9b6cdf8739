//! Services that validate entities and hand them to the stores.
//!
//! The services are the only writers: a write is performed only after its
//! entity passed validation, and the instance returned to callers is always
//! the one the store handed back.

pub mod statuses;
pub mod task_items;

pub use statuses::StatusService;
pub use task_items::TaskItemService;

use crate::store::StoreError;
use crate::validation::Violations;

/// Errors surfaced by the services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The entity broke one or more rules. Nothing was written.
    #[error("Validation failed: {0}")]
    Validation(Violations),
    /// The targeted row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind.
        entity: &'static str,
        /// Raw id that was looked up.
        id: i64,
    },
    /// The store failed.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Store(other),
        }
    }
}

impl From<Violations> for ServiceError {
    fn from(violations: Violations) -> Self {
        Self::Validation(violations)
    }
}
