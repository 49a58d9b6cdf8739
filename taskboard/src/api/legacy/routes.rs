//! Routes for the unversioned `/api` surface.

use axum::{Router, routing::get};

use crate::api::legacy::handlers::{
    create_task_item, delete_task_item, get_task_item, list_task_items, update_task_item,
};
use crate::state::AppState;

/// Legacy routes mounted at `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/TaskItems", get(list_task_items).post(create_task_item))
        .route(
            "/api/TaskItems/{id}",
            get(get_task_item)
                .put(update_task_item)
                .delete(delete_task_item),
        )
}
