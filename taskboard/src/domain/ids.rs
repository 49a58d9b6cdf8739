//! Identifier types for persisted entities.
//!
//! Both entities use integer surrogate keys assigned by the store. An entity
//! that has not been persisted yet carries the unassigned id `0`.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Id carried by entities the store has not assigned a key to yet.
            pub const UNASSIGNED: Self = Self(0);

            /// Wraps a raw key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Whether the store has assigned this id.
            #[must_use]
            pub const fn is_assigned(self) -> bool {
                self.0 != 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

entity_id!(
    /// Task item identifier.
    TaskItemId
);

entity_id!(
    /// Status identifier.
    StatusId
);
