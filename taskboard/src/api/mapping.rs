//! Version tokens and response metadata shared by every API version.

use axum::{
    extract::Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, Serialize};

/// API surface a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Unversioned routes under `/api`.
    Legacy,
    /// Routes under `/api/v1`.
    V1,
}

impl ApiVersion {
    /// Path token of the version, if it has one.
    #[must_use]
    pub const fn token(self) -> Option<&'static str> {
        match self {
            Self::Legacy => None,
            Self::V1 => Some("v1"),
        }
    }

    /// Route prefix for this version.
    #[must_use]
    pub const fn base_path(self) -> &'static str {
        match self {
            Self::Legacy => "/api",
            Self::V1 => "/api/v1",
        }
    }

    /// Collection path for `resource`.
    #[must_use]
    pub fn collection(self, resource: &str) -> String {
        format!("{}/{resource}", self.base_path())
    }

    /// Address of one `resource` row.
    #[must_use]
    pub fn location(self, resource: &str, id: impl std::fmt::Display) -> String {
        format!("{}/{id}", self.collection(resource))
    }
}

/// 201 response with a `Location` header and `body`.
pub fn created<T: Serialize>(location: String, body: T) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response()
}

/// Reads an explicit JSON `null` as the field's default.
///
/// Paired with `#[serde(default)]` so that a missing key and a `null` both
/// reach validation instead of failing deserialization.
///
/// # Errors
///
/// Returns the deserializer's error when the value is neither `null` nor a `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
