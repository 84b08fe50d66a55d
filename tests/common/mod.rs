// Test utility module for trendmap integration tests
#![allow(dead_code)]

use std::cell::Cell;
use std::path::{Path, PathBuf};

use trendmap::core::{BuildOutcome, Issue, Report, Severity};
use trendmap::result::{AnalysisBuild, ReferenceId, ReferenceProvider};

/// Host build stub recording the outcome the engine sets
#[derive(Debug)]
pub struct TestBuild {
    pub number: u32,
    pub job: String,
    pub dir: PathBuf,
    pub outcome: Cell<BuildOutcome>,
}

impl TestBuild {
    pub fn new(number: u32, dir: &Path) -> Self {
        TestBuild {
            number,
            job: "pipeline".to_string(),
            dir: dir.join(number.to_string()),
            outcome: Cell::new(BuildOutcome::Success),
        }
    }
}

impl AnalysisBuild for TestBuild {
    fn number(&self) -> u32 {
        self.number
    }

    fn build_dir(&self) -> PathBuf {
        self.dir.clone()
    }

    fn set_outcome(&self, outcome: BuildOutcome) {
        self.outcome.set(outcome);
    }
}

/// Reference provider backed by an in-memory report
#[derive(Debug, Default)]
pub struct StaticReference {
    pub id: Option<ReferenceId>,
    pub report: Report,
}

impl StaticReference {
    pub fn from_build(build: &TestBuild, report: Report) -> Self {
        StaticReference {
            id: Some(ReferenceId {
                job: build.job.clone(),
                build: build.number.to_string(),
            }),
            report,
        }
    }
}

impl ReferenceProvider for StaticReference {
    fn analysis_build(&self) -> Option<ReferenceId> {
        self.id.clone()
    }

    fn issues(&self) -> Report {
        self.report.clone()
    }
}

pub fn issue(fingerprint: &str, severity: Severity) -> Issue {
    Issue::builder()
        .fingerprint(fingerprint)
        .severity(severity)
        .origin("lint")
        .file("src/lib.rs")
        .line(1)
        .message(format!("finding {fingerprint}"))
        .build()
}

/// Report tagged "lint" with one normal-severity issue per fingerprint
pub fn report(fingerprints: &[&str]) -> Report {
    let mut report = Report::with_origin("lint");
    for fp in fingerprints {
        report.add(issue(fp, Severity::WarningNormal));
    }
    report
}
