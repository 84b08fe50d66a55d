//! Analysis result for one build
//!
//! [`AnalysisResult`] freezes the summary of one analysis run (counts,
//! gate outcome, streaks, reference identity) and owns the lazily
//! cached issue partitions. Construction runs a fixed sequence: diff
//! against the reference, evaluate the quality gate, compute streaks,
//! persist the partitions. No intermediate state escapes and none of
//! the persistence steps can fail construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::PartitionCache;
use crate::core::{BuildOutcome, Report, Severity};
use crate::diff::IssueDifference;
use crate::gate::{IssueMetrics, QualityGate};
use crate::storage::{PartitionKind, ResultStore};

/// The build this engine runs inside, supplied by the host runtime.
///
/// `set_outcome` is the one documented side effect the engine performs
/// on its host: when a quality gate is enabled the owning build's
/// outcome is overwritten with the gate result.
pub trait AnalysisBuild {
    /// Sequence number of this build in the job's linear history
    fn number(&self) -> u32;

    /// Private directory of this build, scope of all persisted blobs
    fn build_dir(&self) -> PathBuf;

    fn set_outcome(&self, outcome: BuildOutcome);
}

/// Durable identity of a reference build.
///
/// A live build handle cannot be persisted, so only the (job, build)
/// pair is stored and the host resolves it back on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceId {
    pub job: String,
    pub build: String,
}

/// Supplies the baseline an analysis run is diffed against
pub trait ReferenceProvider {
    /// Identity of the reference build, absent when there is no history
    fn analysis_build(&self) -> Option<ReferenceId>;

    /// Issues of the reference build
    fn issues(&self) -> Report;
}

/// Provider for jobs without history: no build, empty issues
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReferenceProvider;

impl ReferenceProvider for NullReferenceProvider {
    fn analysis_build(&self) -> Option<ReferenceId> {
        None
    }

    fn issues(&self) -> Report {
        Report::default()
    }
}

/// Result of one static analysis run.
///
/// The durable core (summary counts, messages, gate outcome, streak
/// build numbers, reference identity) is always in memory and survives
/// serialization. The three issue partitions are reconstructible
/// detail: held through the transient [`PartitionCache`] and reloaded
/// from storage whenever they have been evicted. After deserializing a
/// result, call [`AnalysisResult::reattach`] before reading partitions.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    id: String,
    timestamp: DateTime<Utc>,
    metrics: IssueMetrics,
    infos: Vec<String>,
    errors: Vec<String>,
    overall: BuildOutcome,
    /// Build since which the job has zero issues, unset when issues exist
    no_issues_since: Option<u32>,
    /// Build since which the result is successful, unset on failure
    successful_since: Option<u32>,
    reference: Option<ReferenceId>,
    #[serde(skip)]
    partitions: PartitionCache,
}

impl AnalysisResult {
    /// Build the result for the current run.
    ///
    /// `previous` is the result of the directly preceding build when
    /// one exists; it only feeds the streak counters. An absent
    /// reference build is treated as an empty baseline, so every
    /// current issue counts as new.
    pub fn new(
        owner: &dyn AnalysisBuild,
        reference_provider: &dyn ReferenceProvider,
        report: Report,
        gate: &dyn QualityGate,
        previous: Option<&AnalysisResult>,
    ) -> Self {
        let id = report.origin().to_string();
        let build_number = owner.number();

        let reference = reference_provider.analysis_build();
        let reference_issues = reference_provider.issues();
        let difference = IssueDifference::new(&report, build_number, &reference_issues);
        let metrics = IssueMetrics::from_difference(&report, &difference);

        let mut infos = report.info_messages();
        let overall = if gate.is_enabled() {
            let evaluation = gate.evaluate(&metrics);
            if evaluation.outcome.is_success() {
                infos.push("All quality gates have been passed".to_string());
            } else {
                infos.push(format!(
                    "Some quality gates have been missed: overall result is {}",
                    evaluation.outcome
                ));
                infos.extend(evaluation.evaluations);
            }
            owner.set_outcome(evaluation.outcome);
            evaluation.outcome
        } else {
            infos.push("No quality gates have been set - skipping".to_string());
            BuildOutcome::Success
        };

        let no_issues_since = carry_streak(
            metrics.total_size == 0,
            previous.map(|p| p.no_issues_since),
            build_number,
        );
        let successful_since = carry_streak(
            overall.is_success(),
            previous.map(|p| p.successful_since),
            build_number,
        );

        let store = ResultStore::new(owner.build_dir(), &id);
        let partitions = PartitionCache::new(store.clone());
        persist_partitions(&store, &partitions, difference);

        AnalysisResult {
            id,
            timestamp: Utc::now(),
            metrics,
            infos,
            errors: report.error_messages(),
            overall,
            no_issues_since,
            successful_since,
            reference,
            partitions,
        }
    }

    /// Re-initialize transient state after loading from storage.
    ///
    /// The partition cache, its lock and the storage binding are never
    /// serialized; the host calls this once it resolved the owning
    /// build again.
    pub fn reattach(&self, owner: &dyn AnalysisBuild) {
        self.partitions
            .attach(ResultStore::new(owner.build_dir(), &self.id));
    }

    /// Identifier of the tool that produced this result
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// All issues of this run: outstanding plus new
    pub fn issues(&self) -> Report {
        self.new_issues().merge(&self.outstanding_issues())
    }

    /// Issues present in both the current and the reference build
    pub fn outstanding_issues(&self) -> Arc<Report> {
        self.partitions.get(PartitionKind::Outstanding)
    }

    /// Issues that first showed up in this build
    pub fn new_issues(&self) -> Arc<Report> {
        self.partitions.get(PartitionKind::New)
    }

    /// Issues of the reference build no longer present
    pub fn fixed_issues(&self) -> Arc<Report> {
        self.partitions.get(PartitionKind::Fixed)
    }

    /// The frozen summary counts of this run
    pub fn metrics(&self) -> &IssueMetrics {
        &self.metrics
    }

    pub fn total_size(&self) -> usize {
        self.metrics.total_size
    }

    pub fn total_size_of(&self, severity: Severity) -> usize {
        self.metrics.total_size_of(severity)
    }

    pub fn new_size(&self) -> usize {
        self.metrics.new_size
    }

    pub fn new_size_of(&self, severity: Severity) -> usize {
        self.metrics.new_size_of(severity)
    }

    pub fn fixed_size(&self) -> usize {
        self.metrics.fixed_size
    }

    pub fn size_per_origin(&self) -> &HashMap<String, usize> {
        &self.metrics.size_per_origin
    }

    pub fn info_messages(&self) -> &[String] {
        &self.infos
    }

    pub fn error_messages(&self) -> &[String] {
        &self.errors
    }

    pub fn overall_result(&self) -> BuildOutcome {
        self.overall
    }

    pub fn is_successful(&self) -> bool {
        self.overall.is_success()
    }

    /// Build since which the job reports zero issues
    pub fn no_issues_since(&self) -> Option<u32> {
        self.no_issues_since
    }

    /// Build since which the gate outcome is successful
    pub fn successful_since(&self) -> Option<u32> {
        self.successful_since
    }

    /// Identity of the build the diff baseline came from
    pub fn reference(&self) -> Option<&ReferenceId> {
        self.reference.as_ref()
    }
}

impl std::fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} issues", self.id, self.total_size())
    }
}

/// Carry a streak forward, start it, or reset it.
///
/// `previous` is `None` on the first build of a job; the inner option
/// is the previous build's streak start.
fn carry_streak(
    predicate_holds: bool,
    previous: Option<Option<u32>>,
    build_number: u32,
) -> Option<u32> {
    if !predicate_holds {
        return None;
    }
    match previous {
        Some(Some(since)) => Some(since),
        _ => Some(build_number),
    }
}

/// Write all three partitions and seed the cache with weak handles.
///
/// Save failures are logged and swallowed: the summary counts were
/// frozen in memory before persistence, only replay detail is lost.
fn persist_partitions(store: &ResultStore, cache: &PartitionCache, difference: IssueDifference) {
    let (outstanding, new, fixed) = difference.into_parts();
    let parts = [
        (PartitionKind::Outstanding, outstanding),
        (PartitionKind::New, new),
        (PartitionKind::Fixed, fixed),
    ];

    for (kind, report) in parts {
        if let Err(error) = store.save(kind, &report) {
            log::error!("Failed to serialize the {kind} issues of the build: {error:#}");
        }
        cache.seed(kind, &Arc::new(report));
    }
}
