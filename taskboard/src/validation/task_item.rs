//! Task item rules.

use tracing::debug;

use super::{Violation, ViolationKind, Violations, char_len};
use crate::domain::{TITLE_MAX_LEN, TaskItem};
use crate::store::{StatusStore, StoreError};

/// Message for an empty title.
pub const TITLE_REQUIRED: &str = "Title is required.";
/// Message for a title over [`TITLE_MAX_LEN`].
pub const TITLE_TOO_LONG: &str = "Title cannot exceed 100 characters.";
/// Message for a `status_id` with no matching status.
pub const STATUS_ID_INVALID: &str = "StatusId must be a valid status.";

/// Validates task items against the status store.
pub struct TaskItemValidator<'a> {
    statuses: &'a dyn StatusStore,
}

impl<'a> TaskItemValidator<'a> {
    /// Creates a validator reading from `statuses`.
    #[must_use]
    pub fn new(statuses: &'a dyn StatusStore) -> Self {
        Self { statuses }
    }

    /// Runs every task item rule. The description is unconstrained.
    ///
    /// # Errors
    ///
    /// Returns an error if the status lookup fails.
    pub async fn validate(&self, item: &TaskItem) -> Result<Violations, StoreError> {
        let mut violations = title_violations(&item.title);

        if !self.statuses.exists(item.status_id).await? {
            violations.push(Violation::new(
                "StatusId",
                ViolationKind::InvalidReference,
                STATUS_ID_INVALID,
            ));
        }

        if !violations.is_empty() {
            debug!(count = violations.len(), "Task item failed validation");
        }
        Ok(violations)
    }
}

/// Rules on the title alone.
#[must_use]
pub fn title_violations(title: &str) -> Violations {
    let mut violations = Violations::new();
    if title.is_empty() {
        violations.push(Violation::new("Title", ViolationKind::Required, TITLE_REQUIRED));
    }
    if char_len(title) > TITLE_MAX_LEN {
        violations.push(Violation::new(
            "Title",
            ViolationKind::TooLong { max: TITLE_MAX_LEN },
            TITLE_TOO_LONG,
        ));
    }
    violations
}
