//! Health endpoints.
//!
//! `/health` runs every check, `/health/ready` the readiness checks and
//! `/health/live` the liveness checks. Each answers 200 while the aggregate
//! status still serves traffic and 503 once it is unhealthy.

use axum::{
    Router,
    extract::{Json, State},
    http::StatusCode,
    routing::get,
};

use crate::health::{CheckFilter, HealthReport, LIVENESS, READINESS, log_report};
use crate::state::AppState;

async fn respond(state: &AppState, filter: CheckFilter) -> (StatusCode, Json<HealthReport>) {
    let report = state.health.run(filter).await;
    log_report(&report);

    let code = if report.status.is_serving() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    respond(&state, CheckFilter::All).await
}

/// GET /health/ready
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    respond(&state, CheckFilter::Tagged(READINESS)).await
}

/// GET /health/live
pub async fn live(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    respond(&state, CheckFilter::Tagged(LIVENESS)).await
}

/// Health routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .route("/health/live", get(live))
}
