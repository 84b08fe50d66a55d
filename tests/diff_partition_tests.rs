//! Property-based and scenario tests for issue partition computation
//!
//! Invariants verified for all current/reference pairs:
//! - new and outstanding together are exactly the current report
//! - fixed and outstanding together are exactly the reference report
//! - the three partitions are pairwise disjoint

mod common;

use common::{issue, report};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;
use trendmap::core::{Report, Severity};
use trendmap::diff::IssueDifference;

fn fingerprint_set(partition: &Report) -> HashSet<String> {
    partition.fingerprints().map(str::to_string).collect()
}

fn report_from(fingerprints: &HashSet<String>) -> Report {
    let mut result = Report::with_origin("lint");
    for fp in fingerprints {
        result.add(issue(fp, Severity::WarningNormal));
    }
    result
}

proptest! {
    /// Property: new + outstanding cover the current set, fixed +
    /// outstanding cover the reference set, nothing overlaps
    #[test]
    fn prop_partitions_cover_inputs_without_overlap(
        current_fps in prop::collection::hash_set("[a-e]{1,3}", 0..24),
        reference_fps in prop::collection::hash_set("[a-e]{1,3}", 0..24),
    ) {
        let current = report_from(&current_fps);
        let reference = report_from(&reference_fps);

        let diff = IssueDifference::new(&current, 1, &reference);
        let outstanding = fingerprint_set(diff.outstanding());
        let new = fingerprint_set(diff.new_issues());
        let fixed = fingerprint_set(diff.fixed());

        prop_assert_eq!(&new | &outstanding, current_fps);
        prop_assert_eq!(&fixed | &outstanding, reference_fps);
        prop_assert!(new.is_disjoint(&outstanding));
        prop_assert!(fixed.is_disjoint(&outstanding));
        prop_assert!(new.is_disjoint(&fixed));
    }

    /// Property: diffing is deterministic, including issue order
    #[test]
    fn prop_diff_is_deterministic(
        current_fps in prop::collection::vec("[a-e]{1,3}", 0..16),
        reference_fps in prop::collection::vec("[a-e]{1,3}", 0..16),
    ) {
        let current: Report = current_fps.iter().map(|fp| issue(fp, Severity::WarningLow)).collect();
        let reference: Report = reference_fps.iter().map(|fp| issue(fp, Severity::WarningLow)).collect();

        let first = IssueDifference::new(&current, 3, &reference);
        let second = IssueDifference::new(&current, 3, &reference);

        prop_assert_eq!(first.outstanding(), second.outstanding());
        prop_assert_eq!(first.new_issues(), second.new_issues());
        prop_assert_eq!(first.fixed(), second.fixed());
    }
}

#[test]
fn no_reference_marks_all_current_new() {
    let current = report(&["a", "b"]);
    let diff = IssueDifference::new(&current, 1, &Report::default());

    assert!(diff.outstanding().is_empty());
    assert_eq!(fingerprint_set(diff.new_issues()), fingerprint_set(&current));
    assert!(diff.fixed().is_empty());
}

#[test]
fn shared_fingerprint_stays_outstanding_and_rest_is_fixed() {
    let current = report(&["a"]);
    let reference = report(&["a", "b"]);
    let diff = IssueDifference::new(&current, 2, &reference);

    let outstanding: Vec<&str> = diff.outstanding().fingerprints().collect();
    let fixed: Vec<&str> = diff.fixed().fingerprints().collect();

    assert_eq!(outstanding, vec!["a"]);
    assert!(diff.new_issues().is_empty());
    assert_eq!(fixed, vec!["b"]);
}

#[test]
fn fingerprint_match_ignores_other_fields() {
    let mut current = Report::with_origin("lint");
    current.add(issue("a", Severity::Error));

    let mut reference = Report::with_origin("lint");
    reference.add(issue("a", Severity::WarningLow));

    let diff = IssueDifference::new(&current, 2, &reference);

    assert_eq!(diff.outstanding().size(), 1);
    assert!(diff.new_issues().is_empty());
    assert!(diff.fixed().is_empty());
    // the current build's instance wins
    assert_eq!(
        diff.outstanding()
            .find_by_fingerprint("a")
            .unwrap()
            .severity(),
        Severity::Error
    );
}
