//! Property-based tests for the task item title rules.
//!
//! Lengths are counted in characters, so the strategies mix ASCII with
//! multi-byte characters.

#![allow(missing_docs)]

use proptest::prelude::*;
use taskboard::domain::TITLE_MAX_LEN;
use taskboard::validation::ViolationKind;
use taskboard::validation::task_item::title_violations;

/// Strategy for titles of exactly `len` characters.
fn title_of_len(len: usize) -> impl Strategy<Value = String> {
    let chars = prop_oneof![Just('a'), Just('Z'), Just('é'), Just('任'), Just('🚀')];
    proptest::collection::vec(chars, len).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: titles of 1 to 100 characters have no title violations.
    #[test]
    fn title_within_limit_is_valid(
        title in (1..=TITLE_MAX_LEN).prop_flat_map(title_of_len)
    ) {
        prop_assert!(title_violations(&title).is_empty());
    }

    /// Property: titles over 100 characters have exactly one `TooLong`.
    #[test]
    fn title_over_limit_is_too_long_once(
        title in (TITLE_MAX_LEN + 1..=TITLE_MAX_LEN * 3).prop_flat_map(title_of_len)
    ) {
        let violations = title_violations(&title);
        let kinds: Vec<_> = violations.iter().map(|v| v.kind).collect();
        prop_assert_eq!(kinds, vec![ViolationKind::TooLong { max: TITLE_MAX_LEN }]);
    }
}

#[test]
fn empty_title_is_required_once() {
    let violations = title_violations("");
    let kinds: Vec<_> = violations.iter().map(|v| v.kind).collect();
    assert_eq!(kinds, vec![ViolationKind::Required]);
}
