//! Report: an ordered, fingerprint-deduplicated collection of issues

use im::{HashSet, Vector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::{Issue, Severity};

/// Issue collection produced by one analysis run.
///
/// Insertion order is preserved for display; membership is decided by
/// fingerprint alone. No two issues in a report share a fingerprint.
/// Carries side-channel info and error message logs collected while
/// the report was produced.
///
/// Serialization goes through a wire-format shadow struct so the
/// fingerprint index is rebuilt on load instead of being trusted from
/// the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ReportData", into = "ReportData")]
pub struct Report {
    origin: String,
    issues: Vector<Issue>,
    fingerprints: HashSet<String>,
    infos: Vector<String>,
    errors: Vector<String>,
}

/// Wire format of a report: origin, issues and message logs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ReportData {
    #[serde(default)]
    origin: String,
    #[serde(default)]
    issues: Vec<Issue>,
    #[serde(default)]
    infos: Vec<String>,
    #[serde(default)]
    errors: Vec<String>,
}

impl From<ReportData> for Report {
    fn from(data: ReportData) -> Self {
        let mut report = Report::with_origin(data.origin);
        for issue in data.issues {
            report.add(issue);
        }
        for info in data.infos {
            report.add_info(info);
        }
        for error in data.errors {
            report.add_error(error);
        }
        report
    }
}

impl From<Report> for ReportData {
    fn from(report: Report) -> Self {
        ReportData {
            origin: report.origin,
            issues: report.issues.into_iter().collect(),
            infos: report.infos.into_iter().collect(),
            errors: report.errors.into_iter().collect(),
        }
    }
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report tagged with the id of the producing tool
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Report {
            origin: origin.into(),
            ..Self::default()
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Add an issue, rejecting duplicates by fingerprint.
    ///
    /// Returns `false` when an issue with the same fingerprint is
    /// already present; the report is unchanged in that case.
    pub fn add(&mut self, issue: Issue) -> bool {
        if self.fingerprints.contains(issue.fingerprint()) {
            return false;
        }
        self.fingerprints.insert(issue.fingerprint().to_string());
        self.issues.push_back(issue);
        true
    }

    /// Union of this report and `other`, fingerprint-deduplicated
    pub fn merge(&self, other: &Report) -> Report {
        let mut merged = Report::with_origin(self.origin.clone());
        for issue in self.iter().chain(other.iter()) {
            merged.add(issue.clone());
        }
        for info in self.infos.iter().chain(other.infos.iter()) {
            merged.infos.push_back(info.clone());
        }
        for error in self.errors.iter().chain(other.errors.iter()) {
            merged.errors.push_back(error.clone());
        }
        merged
    }

    pub fn size(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues with the given severity
    pub fn size_of(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == severity)
            .count()
    }

    /// Number of issues per origin tag
    pub fn size_per_origin(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for issue in &self.issues {
            *counts.entry(issue.origin().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn contains_fingerprint(&self, fingerprint: &str) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    pub fn find_by_fingerprint(&self, fingerprint: &str) -> Option<&Issue> {
        self.issues
            .iter()
            .find(|issue| issue.fingerprint() == fingerprint)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// Fingerprints of all issues, in insertion order
    pub fn fingerprints(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.fingerprint())
    }

    pub fn add_info(&mut self, message: impl Into<String>) {
        self.infos.push_back(message.into());
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn info_messages(&self) -> Vec<String> {
        self.infos.iter().cloned().collect()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().cloned().collect()
    }

    /// Content equality by fingerprint set, ignoring order and logs
    pub fn same_issues_as(&self, other: &Report) -> bool {
        self.fingerprints == other.fingerprints
    }
}

impl FromIterator<Issue> for Report {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        let mut report = Report::new();
        for issue in iter {
            report.add(issue);
        }
        report
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} issues", self.origin, self.size())
    }
}
