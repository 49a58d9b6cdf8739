//! Status rules.

use tracing::debug;

use super::{Violation, ViolationKind, Violations, char_len};
use crate::domain::{STATUS_DESCRIPTION_MAX_LEN, STATUS_NAME_MAX_LEN, Status};
use crate::store::{StatusStore, StoreError};

/// Message for an empty name.
pub const NAME_REQUIRED: &str = "Status name is required.";
/// Message for a name over [`STATUS_NAME_MAX_LEN`].
pub const NAME_TOO_LONG: &str = "Status name cannot exceed 50 characters.";
/// Message for a name another status already uses.
pub const NAME_DUPLICATE: &str = "A status with the same name already exists.";
/// Message for a description over [`STATUS_DESCRIPTION_MAX_LEN`].
pub const DESCRIPTION_TOO_LONG: &str = "Status description cannot exceed 200 characters.";

/// Validates statuses, including name uniqueness.
pub struct StatusValidator<'a> {
    statuses: &'a dyn StatusStore,
}

impl<'a> StatusValidator<'a> {
    /// Creates a validator reading from `statuses`.
    #[must_use]
    pub fn new(statuses: &'a dyn StatusStore) -> Self {
        Self { statuses }
    }

    /// Runs every status rule.
    ///
    /// The uniqueness check excludes `status.id`, so re-validating a stored
    /// status with its own name passes. An unsaved status has the unassigned
    /// id, which matches no row.
    ///
    /// # Errors
    ///
    /// Returns an error if the uniqueness lookup fails.
    pub async fn validate(&self, status: &Status) -> Result<Violations, StoreError> {
        let mut violations = Violations::new();

        if status.name.is_empty() {
            violations.push(Violation::new("Name", ViolationKind::Required, NAME_REQUIRED));
        }
        if char_len(&status.name) > STATUS_NAME_MAX_LEN {
            violations.push(Violation::new(
                "Name",
                ViolationKind::TooLong {
                    max: STATUS_NAME_MAX_LEN,
                },
                NAME_TOO_LONG,
            ));
        }
        // An empty name has nothing to collide with.
        if !status.name.is_empty() && self.statuses.name_taken(&status.name, status.id).await? {
            violations.push(Violation::new(
                "Name",
                ViolationKind::DuplicateName,
                NAME_DUPLICATE,
            ));
        }

        if status
            .description
            .as_deref()
            .is_some_and(|d| char_len(d) > STATUS_DESCRIPTION_MAX_LEN)
        {
            violations.push(Violation::new(
                "Description",
                ViolationKind::TooLong {
                    max: STATUS_DESCRIPTION_MAX_LEN,
                },
                DESCRIPTION_TOO_LONG,
            ));
        }

        if !violations.is_empty() {
            debug!(count = violations.len(), name = %status.name, "Status failed validation");
        }
        Ok(violations)
    }
}
