//! REST API routes for the v1 surface.

use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    create_status, create_task_item, delete_status, delete_task_item, get_status, get_task_item,
    list_statuses, list_task_items, update_status, update_task_item,
};
use crate::state::AppState;

/// API routes mounted at `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/TaskItems",
            get(list_task_items).post(create_task_item),
        )
        .route(
            "/api/v1/TaskItems/{id}",
            get(get_task_item)
                .put(update_task_item)
                .delete(delete_task_item),
        )
        .route("/api/v1/Status", get(list_statuses).post(create_status))
        .route(
            "/api/v1/Status/{id}",
            get(get_status).put(update_status).delete(delete_status),
        )
}
