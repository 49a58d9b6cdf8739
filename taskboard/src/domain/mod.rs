//! Domain entities for task items and statuses.

pub mod ids;
pub mod status;
pub mod task_item;

pub use ids::{StatusId, TaskItemId};
pub use status::{STATUS_DESCRIPTION_MAX_LEN, STATUS_NAME_MAX_LEN, Status};
pub use task_item::{TITLE_MAX_LEN, TaskItem};
