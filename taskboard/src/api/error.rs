//! API error type and its HTTP rendering.

use axum::{
    extract::{Json, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::service::ServiceError;
use crate::validation::Violations;

/// Title of every validation problem body.
pub const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

/// API errors for task item and status operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Service-level error.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
    /// Request body could not be parsed.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    /// Body id disagrees with the path id.
    #[error("Id mismatch: path {path}, body {body}")]
    IdMismatch {
        /// Id from the path.
        path: i64,
        /// Id from the body.
        body: i64,
    },
}

impl ApiError {
    /// Not-found error for `entity` with `id`.
    #[must_use]
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::Service(ServiceError::NotFound { entity, id })
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Service(ServiceError::Validation(_)) => "validation",
            Self::Service(ServiceError::NotFound { .. }) => "not_found",
            Self::Service(ServiceError::Store(_)) => "store",
            Self::MalformedBody(_) => "malformed_body",
            Self::IdMismatch { .. } => "id_mismatch",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Service(ServiceError::Validation(violations)) => {
                return validation_problem(violations);
            }
            ApiError::Service(ServiceError::NotFound { .. }) => {
                return StatusCode::NOT_FOUND.into_response();
            }
            ApiError::Service(ServiceError::Store(err)) => {
                error!(error = %err, "Store failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::MalformedBody(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::IdMismatch { path, body } => (
                StatusCode::BAD_REQUEST,
                format!("Body id {body} does not match path id {path}"),
            ),
        };

        let body = Json(json!({
            "error": message,
            "error_type": self.kind(),
        }));

        (status, body).into_response()
    }
}

/// 400 response listing every violation, grouped by field.
#[must_use]
pub fn validation_problem(violations: &Violations) -> Response {
    let body = Json(json!({
        "title": VALIDATION_TITLE,
        "status": StatusCode::BAD_REQUEST.as_u16(),
        "errors": violations.by_field(),
    }));
    (StatusCode::BAD_REQUEST, body).into_response()
}
