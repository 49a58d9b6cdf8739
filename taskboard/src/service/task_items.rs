//! Task item service.

use std::sync::Arc;

use tracing::{info, instrument};

use super::ServiceError;
use crate::domain::{TaskItem, TaskItemId};
use crate::infrastructure::audit::{self, AuditEvent};
use crate::store::{StatusStore, TaskItemStore};
use crate::validation::TaskItemValidator;

const ENTITY: &str = "TaskItem";

/// Validating facade over a [`TaskItemStore`].
///
/// The status store is only read, to check `status_id` references.
#[derive(Clone)]
pub struct TaskItemService {
    items: Arc<dyn TaskItemStore>,
    statuses: Arc<dyn StatusStore>,
}

impl std::fmt::Debug for TaskItemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskItemService").finish_non_exhaustive()
    }
}

impl TaskItemService {
    /// Creates a service over the given stores.
    #[must_use]
    pub fn new(items: Arc<dyn TaskItemStore>, statuses: Arc<dyn StatusStore>) -> Self {
        Self { items, statuses }
    }

    /// Lists every task item.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list(&self) -> Result<Vec<TaskItem>, ServiceError> {
        Ok(self.items.list().await?)
    }

    /// Fetches one task item.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no item has this id.
    pub async fn get(&self, id: TaskItemId) -> Result<TaskItem, ServiceError> {
        self.items.get(id).await?.ok_or(ServiceError::NotFound {
            entity: ENTITY,
            id: id.get(),
        })
    }

    /// Validates and stores a new task item.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] with every violation when the item
    /// is invalid; nothing is written in that case.
    #[instrument(skip(self, item), fields(status_id = %item.status_id))]
    pub async fn create(&self, item: TaskItem) -> Result<TaskItem, ServiceError> {
        self.validate(&item).await?;

        let created = self.items.create(&item).await?;
        info!(id = %created.id, "Task item created");
        audit::log_audit(&AuditEvent::RecordCreated {
            entity: ENTITY.into(),
            id: created.id.get(),
        });
        Ok(created)
    }

    /// Fetches `id`, applies `apply` to it, validates the result and stores it.
    ///
    /// The id is restored after `apply` runs, so it cannot be changed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] before `apply` runs when the item does
    /// not exist, and [`ServiceError::Validation`] when the modified item is
    /// invalid.
    #[instrument(skip(self, apply))]
    pub async fn update_with<F>(&self, id: TaskItemId, apply: F) -> Result<TaskItem, ServiceError>
    where
        F: FnOnce(&mut TaskItem) + Send,
    {
        let mut item = self.get(id).await?;
        apply(&mut item);
        item.id = id;
        self.update(item).await
    }

    /// Validates and stores a full replacement of an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when the item is invalid and
    /// [`ServiceError::NotFound`] when the row does not exist.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn update(&self, item: TaskItem) -> Result<TaskItem, ServiceError> {
        self.validate(&item).await?;

        let updated = self.items.update(&item).await?;
        info!(id = %updated.id, "Task item updated");
        Ok(updated)
    }

    /// Deletes a task item. Returns `false` when it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: TaskItemId) -> Result<bool, ServiceError> {
        let removed = self.items.delete(id).await?;
        if removed {
            audit::log_audit(&AuditEvent::RecordDeleted {
                entity: ENTITY.into(),
                id: id.get(),
            });
        }
        Ok(removed)
    }

    async fn validate(&self, item: &TaskItem) -> Result<(), ServiceError> {
        TaskItemValidator::new(self.statuses.as_ref())
            .validate(item)
            .await?
            .into_result()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StatusId;
    use crate::store::{InMemoryTaskItemStore, StoreError};
    use crate::validation::test_support::FixedStatuses;

    fn service() -> (TaskItemService, Arc<InMemoryTaskItemStore>) {
        let items = Arc::new(InMemoryTaskItemStore::new());
        let statuses = Arc::new(FixedStatuses::named(&[(1, "Open"), (2, "Done")]));
        (TaskItemService::new(items.clone(), statuses), items)
    }

    #[tokio::test]
    async fn test_create_persists_valid_item() {
        let (service, items) = service();

        let created = service
            .create(TaskItem::new("Write", None, false, StatusId::new(1)))
            .await
            .unwrap();

        assert!(created.id.is_assigned());
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_item_is_never_written() {
        let (service, items) = service();

        let err = service
            .create(TaskItem::new("", None, false, StatusId::new(999)))
            .await
            .unwrap_err();

        let ServiceError::Validation(violations) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(violations.len(), 2);
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_update_with_validates_post_mutation_state() {
        let (service, _) = service();
        let created = service
            .create(TaskItem::new("Write", None, false, StatusId::new(1)))
            .await
            .unwrap();

        let err = service
            .update_with(created.id, |item| item.title = String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // Stored row is untouched.
        assert_eq!(service.get(created.id).await.unwrap().title, "Write");
    }

    #[tokio::test]
    async fn test_update_with_keeps_id() {
        let (service, _) = service();
        let created = service
            .create(TaskItem::new("Write", None, false, StatusId::new(1)))
            .await
            .unwrap();

        let updated = service
            .update_with(created.id, |item| {
                item.id = TaskItemId::new(777);
                item.is_complete = true;
                item.status_id = StatusId::new(2);
            })
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert!(updated.is_complete);
        assert_eq!(updated.status_id, StatusId::new(2));
    }

    #[tokio::test]
    async fn test_update_with_missing_item_skips_apply() {
        let (service, _) = service();
        let mut applied = false;

        let err = service
            .update_with(TaskItemId::new(5), |_| applied = true)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { id: 5, .. }));
        assert!(!applied);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_returns_false() {
        let (service, _) = service();
        assert!(!service.delete(TaskItemId::new(3)).await.unwrap());
    }

    #[test]
    fn test_store_not_found_maps_to_service_not_found() {
        let err = ServiceError::from(StoreError::NotFound {
            entity: "TaskItem",
            id: 8,
        });
        assert!(matches!(err, ServiceError::NotFound { entity: "TaskItem", id: 8 }));
    }
}
