//! Field-level validation for task items and statuses.
//!
//! Validators run every rule and collect all violations in rule order; an
//! empty [`Violations`] means the entity is valid. Rules that need data
//! (status references, name uniqueness) read through [`StatusStore`], which
//! is why validation is async and can fail with a [`StoreError`].
//!
//! [`StatusStore`]: crate::store::StatusStore
//! [`StoreError`]: crate::store::StoreError

pub mod status;
pub mod task_item;

pub use status::StatusValidator;
pub use task_item::TaskItemValidator;

use std::collections::BTreeMap;

use serde::Serialize;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Value is empty.
    Required,
    /// Value exceeds its maximum length.
    TooLong {
        /// Maximum length in characters.
        max: usize,
    },
    /// Referenced row does not exist.
    InvalidReference,
    /// Another row already uses this value.
    DuplicateName,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field name as exposed to clients (`Title`, `StatusId`, ...).
    pub field: &'static str,
    /// Failed rule.
    pub kind: ViolationKind,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a violation.
    #[must_use]
    pub fn new(field: &'static str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// Ordered set of violations produced by one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Whether no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in rule order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Violations on one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.0.iter().filter(move |v| v.field == field)
    }

    /// Messages grouped by field, preserving rule order within a field.
    #[must_use]
    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut grouped: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for violation in &self.0 {
            grouped
                .entry(violation.field)
                .or_default()
                .push(violation.message.clone());
        }
        grouped
    }

    /// Consumes the set, returning `Ok(())` when empty.
    ///
    /// # Errors
    ///
    /// Returns the violations themselves when any rule failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<T: IntoIterator<Item = Violation>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Length in characters, which is what every max-length rule counts.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
