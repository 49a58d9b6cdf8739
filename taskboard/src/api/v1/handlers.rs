//! API Handler implementations for the v1 routes.

use axum::{
    extract::{Json, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};

use crate::api::error::ApiError;
use crate::api::mapping::{self, ApiVersion};
use crate::api::v1::types::{
    StatusRequest, StatusResponse, TaskItemRequest, TaskItemResponse, status_to_response,
    task_item_to_response,
};
use crate::domain::{StatusId, TaskItemId};
use crate::state::AppState;

/// GET /api/v1/TaskItems
pub async fn list_task_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskItemResponse>>, ApiError> {
    let items = state.task_items.list().await?;
    Ok(Json(items.iter().map(task_item_to_response).collect()))
}

/// GET /api/v1/TaskItems/{id}
pub async fn get_task_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaskItemResponse>, ApiError> {
    let item = state.task_items.get(TaskItemId::new(id)).await?;
    Ok(Json(task_item_to_response(&item)))
}

/// POST /api/v1/TaskItems
///
/// Responds 201 with the stored item and its `Location`.
pub async fn create_task_item(
    State(state): State<AppState>,
    payload: Result<Json<TaskItemRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let created = state.task_items.create(request.into_entity()).await?;

    Ok(mapping::created(
        ApiVersion::V1.location("TaskItems", created.id),
        task_item_to_response(&created),
    ))
}

/// PUT /api/v1/TaskItems/{id}
///
/// Replaces every mutable field and responds 200 with the stored item.
pub async fn update_task_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<TaskItemRequest>, JsonRejection>,
) -> Result<Json<TaskItemResponse>, ApiError> {
    let Json(request) = payload?;
    let updated = state
        .task_items
        .update_with(TaskItemId::new(id), |item| request.apply_to(item))
        .await?;
    Ok(Json(task_item_to_response(&updated)))
}

/// DELETE /api/v1/TaskItems/{id}
pub async fn delete_task_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.task_items.delete(TaskItemId::new(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("TaskItem", id))
    }
}

/// GET /api/v1/Status
pub async fn list_statuses(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusResponse>>, ApiError> {
    let statuses = state.statuses.list().await?;
    Ok(Json(statuses.iter().map(status_to_response).collect()))
}

/// GET /api/v1/Status/{id}
pub async fn get_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = state.statuses.get(StatusId::new(id)).await?;
    Ok(Json(status_to_response(&status)))
}

/// POST /api/v1/Status
pub async fn create_status(
    State(state): State<AppState>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let created = state.statuses.create(request.into_entity()).await?;

    Ok(mapping::created(
        ApiVersion::V1.location("Status", created.id),
        status_to_response(&created),
    ))
}

/// PUT /api/v1/Status/{id}
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(request) = payload?;
    let updated = state
        .statuses
        .update_with(StatusId::new(id), |status| request.apply_to(status))
        .await?;
    Ok(Json(status_to_response(&updated)))
}

/// DELETE /api/v1/Status/{id}
pub async fn delete_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.statuses.delete(StatusId::new(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Status", id))
    }
}
