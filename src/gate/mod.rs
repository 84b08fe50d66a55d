//! Quality gate contract and a threshold-based implementation
//!
//! The engine only depends on the [`QualityGate`] trait: given the
//! frozen summary counts of one build it returns an overall outcome
//! plus per-rule evaluation lines. [`ThresholdGate`] is the built-in
//! rule set driven by [`GateConfig`](crate::config::GateConfig).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::GateConfig;
use crate::core::{BuildOutcome, Report, Severity};
use crate::diff::IssueDifference;

/// Summary counts of one build, the exact input of gate evaluation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueMetrics {
    pub total_size: usize,
    pub total_errors: usize,
    pub total_high: usize,
    pub total_normal: usize,
    pub total_low: usize,
    pub new_size: usize,
    pub new_errors: usize,
    pub new_high: usize,
    pub new_normal: usize,
    pub new_low: usize,
    pub fixed_size: usize,
    pub size_per_origin: HashMap<String, usize>,
}

impl IssueMetrics {
    /// Snapshot the counts of a report and its computed difference
    pub fn from_difference(report: &Report, difference: &IssueDifference) -> Self {
        let new = difference.new_issues();
        IssueMetrics {
            total_size: report.size(),
            total_errors: report.size_of(Severity::Error),
            total_high: report.size_of(Severity::WarningHigh),
            total_normal: report.size_of(Severity::WarningNormal),
            total_low: report.size_of(Severity::WarningLow),
            new_size: new.size(),
            new_errors: new.size_of(Severity::Error),
            new_high: new.size_of(Severity::WarningHigh),
            new_normal: new.size_of(Severity::WarningNormal),
            new_low: new.size_of(Severity::WarningLow),
            fixed_size: difference.fixed().size(),
            size_per_origin: report.size_per_origin(),
        }
    }

    pub fn total_size_of(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.total_errors,
            Severity::WarningHigh => self.total_high,
            Severity::WarningNormal => self.total_normal,
            Severity::WarningLow => self.total_low,
        }
    }

    pub fn new_size_of(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.new_errors,
            Severity::WarningHigh => self.new_high,
            Severity::WarningNormal => self.new_normal,
            Severity::WarningLow => self.new_low,
        }
    }
}

/// Outcome of one gate evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateEvaluation {
    pub outcome: BuildOutcome,
    pub evaluations: Vec<String>,
}

impl GateEvaluation {
    pub fn passed() -> Self {
        GateEvaluation {
            outcome: BuildOutcome::Success,
            evaluations: Vec::new(),
        }
    }
}

/// Maps summary metrics to a pass/fail outcome plus explanations
pub trait QualityGate {
    fn is_enabled(&self) -> bool;

    fn evaluate(&self, metrics: &IssueMetrics) -> GateEvaluation;
}

/// A gate that never gates: disabled, always successful
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGate;

impl QualityGate for NoGate {
    fn is_enabled(&self) -> bool {
        false
    }

    fn evaluate(&self, _metrics: &IssueMetrics) -> GateEvaluation {
        GateEvaluation::passed()
    }
}

/// Threshold rules over total and new issue counts.
///
/// Each configured threshold is one rule: reaching the unstable
/// threshold marks the build unstable, reaching the failed threshold
/// fails it. The worst triggered outcome wins.
#[derive(Debug, Clone, Default)]
pub struct ThresholdGate {
    config: GateConfig,
}

impl ThresholdGate {
    pub fn new(config: GateConfig) -> Self {
        ThresholdGate { config }
    }

    fn check(
        label: &str,
        actual: usize,
        threshold: Option<usize>,
        outcome: BuildOutcome,
    ) -> Option<(BuildOutcome, String)> {
        let limit = threshold?;
        if actual >= limit {
            Some((
                outcome,
                format!("{label}: {actual} issues reached threshold {limit} -> {outcome}"),
            ))
        } else {
            None
        }
    }
}

impl QualityGate for ThresholdGate {
    fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    fn evaluate(&self, metrics: &IssueMetrics) -> GateEvaluation {
        let checks = [
            Self::check(
                "Total issues",
                metrics.total_size,
                self.config.unstable_total,
                BuildOutcome::Unstable,
            ),
            Self::check(
                "Total issues",
                metrics.total_size,
                self.config.failed_total,
                BuildOutcome::Failure,
            ),
            Self::check(
                "New issues",
                metrics.new_size,
                self.config.unstable_new,
                BuildOutcome::Unstable,
            ),
            Self::check(
                "New issues",
                metrics.new_size,
                self.config.failed_new,
                BuildOutcome::Failure,
            ),
        ];

        let mut outcome = BuildOutcome::Success;
        let mut evaluations = Vec::new();
        for (triggered, line) in checks.into_iter().flatten() {
            outcome = outcome.worst(triggered);
            evaluations.push(line);
        }

        GateEvaluation {
            outcome,
            evaluations,
        }
    }
}
