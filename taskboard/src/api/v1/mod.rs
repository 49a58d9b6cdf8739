//! Versioned task item and status API under `/api/v1`.
//!
//! Task items are persisted in `SQLite` and returned with their status name
//! flattened in. Updates answer 200 with the stored entity.

pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::routes;
pub use types::{StatusRequest, StatusResponse, TaskItemRequest, TaskItemResponse};

#[cfg(test)]
mod tests {
    use crate::state::test_support::{bytes, json, send, state};
    use axum::http::{StatusCode, header};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_returns_location_and_status_name() {
        let state = state().await;
        let response = send(
            &state,
            "POST",
            "/api/v1/TaskItems",
            Some(json!({"title": "Write report", "statusId": 2})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/v1/TaskItems/1");
        let body = json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["statusName"], "In Progress");
        assert_eq!(body["isComplete"], false);
    }

    #[tokio::test]
    async fn test_create_with_empty_title_is_a_validation_problem() {
        let state = state().await;
        let response = send(
            &state,
            "POST",
            "/api/v1/TaskItems",
            Some(json!({"title": "", "statusId": 1})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["errors"]["Title"][0], "Title is required.");
        assert!(body["errors"].get("StatusId").is_none());
    }

    #[tokio::test]
    async fn test_create_reports_every_violation() {
        let state = state().await;
        let response = send(
            &state,
            "POST",
            "/api/v1/TaskItems",
            Some(json!({"title": "t".repeat(101), "statusId": 999})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["errors"]["Title"][0], "Title cannot exceed 100 characters.");
        assert_eq!(body["errors"]["StatusId"][0], "StatusId must be a valid status.");

        let list = json(send(&state, "GET", "/api/v1/TaskItems", None).await).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_null_title_is_validated_with_other_fields() {
        let state = state().await;
        let response = send(
            &state,
            "POST",
            "/api/v1/TaskItems",
            Some(json!({"title": null, "statusId": 999})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["errors"]["Title"][0], "Title is required.");
        assert_eq!(body["errors"]["StatusId"][0], "StatusId must be a valid status.");
    }

    #[tokio::test]
    async fn test_null_status_name_is_required() {
        let state = state().await;
        let response = send(
            &state,
            "POST",
            "/api/v1/Status",
            Some(json!({"name": null, "description": null})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["errors"]["Name"][0], "Status name is required.");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let state = state().await;
        let response = send(
            &state,
            "POST",
            "/api/v1/TaskItems",
            Some(json!({"title": 42})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["error_type"], "malformed_body");
    }

    #[tokio::test]
    async fn test_get_unknown_task_item_is_empty_not_found() {
        let state = state().await;
        let response = send(&state, "GET", "/api/v1/TaskItems/77", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_returns_stored_item() {
        let state = state().await;
        send(
            &state,
            "POST",
            "/api/v1/TaskItems",
            Some(json!({"title": "Draft", "statusId": 1})),
        )
        .await;

        let response = send(
            &state,
            "PUT",
            "/api/v1/TaskItems/1",
            Some(json!({"title": "Final", "description": "done", "isComplete": true, "statusId": 3})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["title"], "Final");
        assert_eq!(body["description"], "done");
        assert_eq!(body["isComplete"], true);
        assert_eq!(body["statusName"], "Completed");

        let fetched = json(send(&state, "GET", "/api/v1/TaskItems/1", None).await).await;
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found_even_when_invalid() {
        let state = state().await;
        let response = send(
            &state,
            "PUT",
            "/api/v1/TaskItems/5",
            Some(json!({"title": "", "statusId": 999})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_delete_again() {
        let state = state().await;
        send(
            &state,
            "POST",
            "/api/v1/TaskItems",
            Some(json!({"title": "Short lived", "statusId": 1})),
        )
        .await;

        let first = send(&state, "DELETE", "/api/v1/TaskItems/1", None).await;
        assert_eq!(first.status(), StatusCode::NO_CONTENT);
        let second = send(&state, "DELETE", "/api/v1/TaskItems/1", None).await;
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_seeded_statuses_are_listed() {
        let state = state().await;
        let body = json(send(&state, "GET", "/api/v1/Status", None).await).await;

        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Not Started", "In Progress", "Completed"]);
        assert!(body[0].get("createdDate").is_some());
    }

    #[tokio::test]
    async fn test_duplicate_status_name_is_rejected() {
        let state = state().await;
        let response = send(
            &state,
            "POST",
            "/api/v1/Status",
            Some(json!({"name": "Completed"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(
            body["errors"]["Name"][0],
            "A status with the same name already exists."
        );
    }

    #[tokio::test]
    async fn test_status_create_and_update() {
        let state = state().await;
        let created = send(
            &state,
            "POST",
            "/api/v1/Status",
            Some(json!({"name": "Blocked", "description": "Waiting"})),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        assert_eq!(created.headers()[header::LOCATION], "/api/v1/Status/4");
        let created = json(created).await;

        let updated = send(
            &state,
            "PUT",
            "/api/v1/Status/4",
            Some(json!({"name": "Blocked", "description": "Waiting on review"})),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = json(updated).await;
        assert_eq!(updated["description"], "Waiting on review");
        assert_eq!(updated["createdDate"], created["createdDate"]);
    }

    #[tokio::test]
    async fn test_deleted_status_orphans_task_items() {
        let state = state().await;
        send(
            &state,
            "POST",
            "/api/v1/TaskItems",
            Some(json!({"title": "Orphan", "statusId": 3})),
        )
        .await;

        let deleted = send(&state, "DELETE", "/api/v1/Status/3", None).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let item = json(send(&state, "GET", "/api/v1/TaskItems/1", None).await).await;
        assert_eq!(item["statusId"], 3);
        assert!(item["statusName"].is_null());
    }
}
