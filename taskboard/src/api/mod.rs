//! REST API for task items and statuses.
//!
//! Two surfaces share one router: the unversioned legacy routes under `/api`
//! and the versioned routes under `/api/v1`. Health endpoints sit beside them.

pub mod error;
pub mod health;
pub mod legacy;
pub mod mapping;
pub mod v1;

pub use error::ApiError;
pub use mapping::ApiVersion;

use axum::Router;

use crate::state::AppState;

/// Builds the complete application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(legacy::routes())
        .merge(v1::routes())
        .merge(health::routes())
        .with_state(state)
}
