//! Unversioned task item API under `/api`.
//!
//! Kept for existing clients. Task items live in process memory, responses
//! are the stored entity as-is and updates answer 204. Status references are
//! still checked against the shared status store.

pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::routes;
pub use types::LegacyTaskItemRequest;
