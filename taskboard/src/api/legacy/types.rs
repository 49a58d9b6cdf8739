//! Request body for the legacy task item routes.
//!
//! Responses on this surface are the [`TaskItem`] entity itself.

use serde::Deserialize;

use crate::api::mapping::null_as_default;
use crate::domain::{StatusId, TaskItem, TaskItemId};

/// Body of legacy task item create and update requests.
///
/// Clients historically echo the id back on update; when present it must
/// match the path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyTaskItemRequest {
    /// Echoed id, if any.
    pub id: Option<TaskItemId>,
    /// Title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Completion flag.
    #[serde(deserialize_with = "null_as_default")]
    pub is_complete: bool,
    /// Referenced status.
    #[serde(deserialize_with = "null_as_default")]
    pub status_id: StatusId,
}

impl LegacyTaskItemRequest {
    /// Echoed id when it disagrees with `path`.
    #[must_use]
    pub fn mismatched_id(&self, path: TaskItemId) -> Option<TaskItemId> {
        self.id.filter(|id| *id != path)
    }

    /// Builds an unsaved entity; an echoed id is ignored on create.
    #[must_use]
    pub fn into_entity(self) -> TaskItem {
        TaskItem::new(self.title, self.description, self.is_complete, self.status_id)
    }

    /// Overwrites every mutable field of `item`.
    pub fn apply_to(self, item: &mut TaskItem) {
        item.title = self.title;
        item.description = self.description;
        item.is_complete = self.is_complete;
        item.status_id = self.status_id;
        item.status = None;
    }
}
