//! Issue difference computation between two analysis runs
//!
//! Partitions the current report against a reference report into
//! outstanding (present in both), new (only current) and fixed (only
//! reference) issues. Matching is by fingerprint equality alone so an
//! issue survives message or line-number drift between builds.

use std::collections::HashSet;

use crate::core::Report;

/// The three partitions computed from one current/reference pair.
///
/// Pure computation: builds a fingerprint index of the reference,
/// classifies each current issue as outstanding or new, then collects
/// reference issues absent from the current report as fixed. New
/// issues are stamped with the build number they first appeared in.
#[derive(Debug, Clone)]
pub struct IssueDifference {
    outstanding: Report,
    new: Report,
    fixed: Report,
}

impl IssueDifference {
    pub fn new(current: &Report, build_number: u32, reference: &Report) -> Self {
        let reference_fingerprints: HashSet<&str> = reference.fingerprints().collect();

        let mut outstanding = Report::with_origin(current.origin());
        let mut new = Report::with_origin(current.origin());
        for issue in current.iter() {
            if reference_fingerprints.contains(issue.fingerprint()) {
                outstanding.add(issue.clone());
            } else {
                new.add(issue.with_first_seen(build_number));
            }
        }

        let mut fixed = Report::with_origin(current.origin());
        for issue in reference.iter() {
            if !current.contains_fingerprint(issue.fingerprint()) {
                fixed.add(issue.clone());
            }
        }

        IssueDifference {
            outstanding,
            new,
            fixed,
        }
    }

    /// Issues present in both the current and the reference report
    pub fn outstanding(&self) -> &Report {
        &self.outstanding
    }

    /// Issues present only in the current report
    pub fn new_issues(&self) -> &Report {
        &self.new
    }

    /// Issues present only in the reference report
    pub fn fixed(&self) -> &Report {
        &self.fixed
    }

    /// Consume the difference, yielding (outstanding, new, fixed)
    pub fn into_parts(self) -> (Report, Report, Report) {
        (self.outstanding, self.new, self.fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Issue, Severity};

    fn issue(fingerprint: &str) -> Issue {
        Issue::builder()
            .fingerprint(fingerprint)
            .severity(Severity::WarningNormal)
            .origin("lint")
            .file("src/lib.rs")
            .message("m")
            .build()
    }

    fn report(fingerprints: &[&str]) -> Report {
        fingerprints.iter().map(|fp| issue(fp)).collect()
    }

    #[test]
    fn empty_reference_marks_everything_new() {
        let current = report(&["a", "b"]);
        let diff = IssueDifference::new(&current, 1, &Report::new());

        assert!(diff.outstanding().is_empty());
        assert_eq!(diff.new_issues().size(), 2);
        assert!(diff.fixed().is_empty());
    }

    #[test]
    fn matching_fingerprints_are_outstanding() {
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
    fn empty_current_marks_reference_fixed() {
        let reference = report(&["a", "b", "c"]);
        let diff = IssueDifference::new(&Report::new(), 3, &reference);

        assert!(diff.outstanding().is_empty());
        assert!(diff.new_issues().is_empty());
        assert_eq!(diff.fixed().size(), 3);
    }

    #[test]
    fn both_empty_yields_three_empty_partitions() {
        let diff = IssueDifference::new(&Report::new(), 1, &Report::new());
        assert!(diff.outstanding().is_empty());
        assert!(diff.new_issues().is_empty());
        assert!(diff.fixed().is_empty());
    }

    #[test]
    fn new_issues_are_stamped_with_build_number() {
        let current = report(&["a"]);
        let diff = IssueDifference::new(&current, 42, &Report::new());

        let stamped = diff.new_issues().find_by_fingerprint("a").unwrap();
        assert_eq!(stamped.first_seen(), Some(42));
    }

    #[test]
    fn outstanding_keeps_current_instance() {
        let mut current = Report::new();
        current.add(
            Issue::builder()
                .fingerprint("a")
                .severity(Severity::Error)
                .line(20)
                .message("moved")
                .build(),
        );
        let mut reference = Report::new();
        reference.add(
            Issue::builder()
                .fingerprint("a")
                .severity(Severity::Error)
                .line(10)
                .message("original")
                .build(),
        );

        let diff = IssueDifference::new(&current, 5, &reference);
        let kept = diff.outstanding().find_by_fingerprint("a").unwrap();
        assert_eq!(kept.line(), 20);
        assert_eq!(kept.message(), "moved");
    }

    #[test]
    fn partitions_inherit_current_origin() {
        let current = Report::with_origin("clippy");
        let diff = IssueDifference::new(&current, 1, &Report::new());
        assert_eq!(diff.new_issues().origin(), "clippy");
        assert_eq!(diff.fixed().origin(), "clippy");
    }
}
