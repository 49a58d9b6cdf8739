//! Request/Response Types for the v1 API
//!
//! Task item responses flatten the status relation into `statusName`.
//! Requests deserialize missing and `null` fields to their defaults so validation,
//! not the JSON parser, reports them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::mapping::null_as_default;
use crate::domain::{Status, StatusId, TaskItem, TaskItemId};

/// Body of task item create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskItemRequest {
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

impl TaskItemRequest {
    /// Builds an unsaved entity. Ids are never taken from requests.
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
        // The old relation no longer matches `status_id`.
        item.status = None;
    }
}

/// Task item response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItemResponse {
    /// Task item id.
    pub id: TaskItemId,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Completion flag.
    pub is_complete: bool,
    /// Referenced status.
    pub status_id: StatusId,
    /// Name of the referenced status; null when it was not materialized.
    pub status_name: Option<String>,
}

/// Convert a `TaskItem` domain model to API response.
#[must_use]
pub fn task_item_to_response(item: &TaskItem) -> TaskItemResponse {
    TaskItemResponse {
        id: item.id,
        title: item.title.clone(),
        description: item.description.clone(),
        is_complete: item.is_complete,
        status_id: item.status_id,
        status_name: item.status_name().map(str::to_string),
    }
}

/// Body of status create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusRequest {
    /// Unique name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl StatusRequest {
    /// Builds an unsaved status; the service stamps the real timestamps.
    #[must_use]
    pub fn into_entity(self) -> Status {
        Status::new(self.name, self.description, Utc::now())
    }

    /// Overwrites every mutable field of `status`.
    pub fn apply_to(self, status: &mut Status) {
        status.name = self.name;
        status.description = self.description;
    }
}

/// Status response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Status id.
    pub id: StatusId,
    /// Unique name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_date: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_date: DateTime<Utc>,
}

/// Convert a `Status` domain model to API response.
#[must_use]
pub fn status_to_response(status: &Status) -> StatusResponse {
    StatusResponse {
        id: status.id,
        name: status.name.clone(),
        description: status.description.clone(),
        created_date: status.created_date,
        updated_date: status.updated_date,
    }
}
