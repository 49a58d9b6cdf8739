//! Status service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use super::ServiceError;
use crate::domain::{Status, StatusId};
use crate::infrastructure::audit::{self, AuditEvent};
use crate::store::{StatusStore, StoreError};
use crate::validation::status::NAME_DUPLICATE;
use crate::validation::{StatusValidator, Violation, ViolationKind, Violations};

const ENTITY: &str = "Status";

/// Validating facade over a [`StatusStore`] that also owns the timestamps.
#[derive(Clone)]
pub struct StatusService {
    statuses: Arc<dyn StatusStore>,
}

impl std::fmt::Debug for StatusService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusService").finish_non_exhaustive()
    }
}

impl StatusService {
    /// Creates a service over `statuses`.
    #[must_use]
    pub fn new(statuses: Arc<dyn StatusStore>) -> Self {
        Self { statuses }
    }

    /// Lists every status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list(&self) -> Result<Vec<Status>, ServiceError> {
        Ok(self.statuses.list().await?)
    }

    /// Fetches one status.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when no status has this id.
    pub async fn get(&self, id: StatusId) -> Result<Status, ServiceError> {
        self.statuses.get(id).await?.ok_or(ServiceError::NotFound {
            entity: ENTITY,
            id: id.get(),
        })
    }

    /// Stamps, validates and stores a new status.
    ///
    /// Both timestamps are set to the current time, whatever `status` carried.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] with every violation when the status
    /// is invalid.
    #[instrument(skip(self, status), fields(name = %status.name))]
    pub async fn create(&self, mut status: Status) -> Result<Status, ServiceError> {
        let now = Utc::now();
        status.id = StatusId::UNASSIGNED;
        status.created_date = now;
        status.updated_date = now;
        self.validate(&status).await?;

        let created = self
            .statuses
            .create(&status)
            .await
            .map_err(conflict_as_violation)?;
        info!(id = %created.id, "Status created");
        audit::log_audit(&AuditEvent::RecordCreated {
            entity: ENTITY.into(),
            id: created.id.get(),
        });
        Ok(created)
    }

    /// Fetches `id`, applies `apply`, then validates and stores the result.
    ///
    /// The id and creation date are restored after `apply` runs; the update
    /// date is set to the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] before `apply` runs when the status
    /// does not exist, and [`ServiceError::Validation`] when the modified
    /// status is invalid.
    #[instrument(skip(self, apply))]
    pub async fn update_with<F>(&self, id: StatusId, apply: F) -> Result<Status, ServiceError>
    where
        F: FnOnce(&mut Status) + Send,
    {
        let existing = self.get(id).await?;
        let mut status = existing.clone();
        apply(&mut status);
        status.id = id;
        status.created_date = existing.created_date;
        status.updated_date = Utc::now();
        self.validate(&status).await?;

        let updated = self
            .statuses
            .update(&status)
            .await
            .map_err(conflict_as_violation)?;
        info!(id = %updated.id, "Status updated");
        Ok(updated)
    }

    /// Deletes a status. Returns `false` when it did not exist.
    ///
    /// Task items referencing the status are left in place; their `status`
    /// relation reads back as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: StatusId) -> Result<bool, ServiceError> {
        let removed = self.statuses.delete(id).await?;
        if removed {
            audit::log_audit(&AuditEvent::RecordDeleted {
                entity: ENTITY.into(),
                id: id.get(),
            });
        }
        Ok(removed)
    }

    async fn validate(&self, status: &Status) -> Result<(), ServiceError> {
        StatusValidator::new(self.statuses.as_ref())
            .validate(status)
            .await?
            .into_result()?;
        Ok(())
    }
}

/// A name collision that slipped past validation, reported the same way.
fn conflict_as_violation(err: StoreError) -> ServiceError {
    match err {
        StoreError::Conflict { field: "Name", .. } => {
            let mut violations = Violations::new();
            violations.push(Violation::new(
                "Name",
                ViolationKind::DuplicateName,
                NAME_DUPLICATE,
            ));
            ServiceError::Validation(violations)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::DatabaseSettings;
    use crate::store::SqliteStore;
    use crate::validation::ViolationKind;
    use chrono::Duration;
    use secrecy::SecretString;

    async fn service() -> StatusService {
        let store = SqliteStore::connect(&DatabaseSettings {
            url: SecretString::from("sqlite::memory:"),
            max_connections: 1,
            seed_statuses: true,
        })
        .await
        .unwrap();
        StatusService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_create_sets_timestamps() {
        let service = service().await;
        let stale = Utc::now() - Duration::days(30);

        let created = service
            .create(Status::new("Blocked", None, stale))
            .await
            .unwrap();

        assert!(created.created_date > stale);
        assert_eq!(created.created_date, created.updated_date);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_is_rejected() {
        let service = service().await;

        let err = service
            .create(Status::new("In Progress", None, Utc::now()))
            .await
            .unwrap_err();

        let ServiceError::Validation(violations) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let kinds: Vec<_> = violations.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, vec![ViolationKind::DuplicateName]);
    }

    #[tokio::test]
    async fn test_update_keeping_own_name_is_valid() {
        let service = service().await;
        let before = service.get(StatusId::new(2)).await.unwrap();

        let updated = service
            .update_with(before.id, |status| {
                status.description = Some("Actively worked on".into());
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "In Progress");
        assert_eq!(updated.created_date, before.created_date);
        assert!(updated.updated_date >= before.updated_date);
        assert_eq!(service.get(before.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_onto_existing_name_is_rejected() {
        let service = service().await;

        let err = service
            .update_with(StatusId::new(2), |status| status.name = "Completed".into())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(service.get(StatusId::new(2)).await.unwrap().name, "In Progress");
    }

    #[tokio::test]
    async fn test_update_missing_status_is_not_found() {
        let service = service().await;
        let err = service
            .update_with(StatusId::new(99), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Status", id: 99 }));
    }

    #[test]
    fn test_store_conflict_becomes_duplicate_name() {
        let err = conflict_as_violation(StoreError::Conflict {
            entity: "Status",
            field: "Name",
        });
        let ServiceError::Validation(violations) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let names: Vec<_> = violations.for_field("Name").map(|v| v.message.as_str()).collect();
        assert_eq!(names, vec![NAME_DUPLICATE]);
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service().await;
        assert!(service.delete(StatusId::new(3)).await.unwrap());
        assert!(!service.delete(StatusId::new(3)).await.unwrap());
        assert_eq!(service.list().await.unwrap().len(), 2);
    }
}
