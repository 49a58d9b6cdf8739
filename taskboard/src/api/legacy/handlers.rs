//! Handlers for the legacy task item routes.

use axum::{
    extract::{Json, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};

use crate::api::error::ApiError;
use crate::api::legacy::types::LegacyTaskItemRequest;
use crate::api::mapping::{self, ApiVersion};
use crate::domain::{TaskItem, TaskItemId};
use crate::state::AppState;

/// GET /api/TaskItems
pub async fn list_task_items(State(state): State<AppState>) -> Result<Json<Vec<TaskItem>>, ApiError> {
    Ok(Json(state.legacy_task_items.list().await?))
}

/// GET /api/TaskItems/{id}
pub async fn get_task_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskItem>, ApiError> {
    Ok(Json(state.legacy_task_items.get(TaskItemId::new(id)).await?))
}

/// POST /api/TaskItems
pub async fn create_task_item(
    State(state): State<AppState>,
    payload: Result<Json<LegacyTaskItemRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let created = state.legacy_task_items.create(request.into_entity()).await?;

    Ok(mapping::created(
        ApiVersion::Legacy.location("TaskItems", created.id),
        created,
    ))
}

/// PUT /api/TaskItems/{id}
///
/// Responds 204 with no body. An unknown id is reported before a body id
/// that disagrees with the path.
pub async fn update_task_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<LegacyTaskItemRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    let id = TaskItemId::new(id);
    state.legacy_task_items.get(id).await?;
    if let Some(body) = request.mismatched_id(id) {
        return Err(ApiError::IdMismatch {
            path: id.get(),
            body: body.get(),
        });
    }

    state
        .legacy_task_items
        .update_with(id, |item| request.apply_to(item))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/TaskItems/{id}
pub async fn delete_task_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.legacy_task_items.delete(TaskItemId::new(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("TaskItem", id))
    }
}
