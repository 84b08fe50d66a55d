//! Core data model shared across the crate

pub mod issue;
pub mod report;

use serde::{Deserialize, Serialize};

pub use issue::{Issue, IssueBuilder};
pub use report::Report;

/// Severity levels for issues, ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    WarningLow,
    WarningNormal,
    WarningHigh,
    Error,
}

impl Severity {
    /// All severities, most severe first
    pub fn descending() -> [Severity; 4] {
        [
            Severity::Error,
            Severity::WarningHigh,
            Severity::WarningNormal,
            Severity::WarningLow,
        ]
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Severity, &str)] = &[
            (Severity::WarningLow, "low"),
            (Severity::WarningNormal, "normal"),
            (Severity::WarningHigh, "high"),
            (Severity::Error, "error"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, d)| *d)
            .unwrap_or("unknown");

        write!(f, "{display_str}")
    }
}

/// Overall outcome of a build, ascending by badness
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BuildOutcome {
    #[default]
    Success,
    Unstable,
    Failure,
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }

    /// Combine two outcomes, keeping the worse one
    pub fn worst(self, other: BuildOutcome) -> BuildOutcome {
        self.max(other)
    }
}

impl std::fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(BuildOutcome, &str)] = &[
            (BuildOutcome::Success, "SUCCESS"),
            (BuildOutcome::Unstable, "UNSTABLE"),
            (BuildOutcome::Failure, "FAILURE"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(o, _)| o == self)
            .map(|(_, d)| *d)
            .unwrap_or("UNKNOWN");

        write!(f, "{display_str}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering_is_ascending() {
        assert!(Severity::Error > Severity::WarningHigh);
        assert!(Severity::WarningHigh > Severity::WarningNormal);
        assert!(Severity::WarningNormal > Severity::WarningLow);
    }

    #[test]
    fn outcome_worst_prefers_failure() {
        assert_eq!(
            BuildOutcome::Success.worst(BuildOutcome::Unstable),
            BuildOutcome::Unstable
        );
        assert_eq!(
            BuildOutcome::Failure.worst(BuildOutcome::Unstable),
            BuildOutcome::Failure
        );
        assert_eq!(
            BuildOutcome::Success.worst(BuildOutcome::Success),
            BuildOutcome::Success
        );
    }
}
