//! Task item entity.

use serde::{Deserialize, Serialize};

use super::ids::{StatusId, TaskItemId};
use super::status::Status;

/// Maximum length of a task item title, in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// A unit of work tracked by the service.
///
/// `status` is a read-side materialization of the row `status_id` points to.
/// It is never persisted on its own; see the store implementations for which
/// read paths populate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    /// Store-assigned id.
    pub id: TaskItemId,
    /// Short title, required.
    pub title: String,
    /// Optional description of any length.
    pub description: Option<String>,
    /// Whether the work is done.
    pub is_complete: bool,
    /// Referenced status.
    pub status_id: StatusId,
    /// Materialized status, when the read path joined it.
    pub status: Option<Status>,
}

impl TaskItem {
    /// Creates an unsaved task item.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        is_complete: bool,
        status_id: StatusId,
    ) -> Self {
        Self {
            id: TaskItemId::UNASSIGNED,
            title: title.into(),
            description,
            is_complete,
            status_id,
            status: None,
        }
    }

    /// Name of the materialized status, if any.
    #[must_use]
    pub fn status_name(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.name.as_str())
    }

    /// Returns a copy without the materialized relation.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self {
            status: None,
            ..self.clone()
        }
    }
}
