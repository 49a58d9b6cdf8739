//! Status entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::StatusId;

/// Maximum length of a status name, in characters.
pub const STATUS_NAME_MAX_LEN: usize = 50;
/// Maximum length of a status description, in characters.
pub const STATUS_DESCRIPTION_MAX_LEN: usize = 200;

/// A workflow status a task item can be in.
///
/// Names are unique across all statuses (exact, case-sensitive match).
/// Timestamps are set by the service layer, never by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Store-assigned id.
    pub id: StatusId,
    /// Unique display name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// When the status was created.
    pub created_date: DateTime<Utc>,
    /// When the status was last written.
    pub updated_date: DateTime<Utc>,
}

impl Status {
    /// Creates an unsaved status stamped with `now`.
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: StatusId::UNASSIGNED,
            name: name.into(),
            description,
            created_date: now,
            updated_date: now,
        }
    }
}
