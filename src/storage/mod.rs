//! Durable storage for issue partitions
//!
//! Partitions are persisted as JSON blobs under the owning build's
//! directory so evicted in-memory copies can be rehydrated later. The
//! blobs are reproducible detail; the summary counts frozen in the
//! analysis result stay correct even when a blob is lost.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::core::Report;

/// Which of the three derived issue partitions a blob holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionKind {
    Outstanding,
    New,
    Fixed,
}

impl PartitionKind {
    pub fn all() -> [PartitionKind; 3] {
        [
            PartitionKind::Outstanding,
            PartitionKind::New,
            PartitionKind::Fixed,
        ]
    }

    /// File name suffix for this partition
    pub fn suffix(&self) -> &'static str {
        match self {
            PartitionKind::Outstanding => "outstanding",
            PartitionKind::New => "new",
            PartitionKind::Fixed => "fixed",
        }
    }
}

impl std::fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Reads and writes the partition blobs of one analysis result.
///
/// Blobs are namespaced `{id}-{suffix}-issues.json` inside the build
/// directory. All failures are recoverable: `load_or_empty` degrades
/// to an empty report and save errors are the caller's to log and
/// swallow.
#[derive(Debug, Clone)]
pub struct ResultStore {
    build_dir: PathBuf,
    id: String,
}

impl ResultStore {
    pub fn new(build_dir: impl Into<PathBuf>, id: impl Into<String>) -> Self {
        ResultStore {
            build_dir: build_dir.into(),
            id: id.into(),
        }
    }

    /// Path of the blob holding the given partition
    pub fn data_file(&self, kind: PartitionKind) -> PathBuf {
        self.build_dir
            .join(format!("{}-{}-issues.json", self.id, kind.suffix()))
    }

    /// Persist one partition, overwriting any previous blob
    pub fn save(&self, kind: PartitionKind, report: &Report) -> Result<()> {
        fs::create_dir_all(&self.build_dir)
            .with_context(|| format!("Failed to create build directory {:?}", self.build_dir))?;

        let target = self.data_file(kind);
        let data = serde_json::to_vec_pretty(report)
            .with_context(|| format!("Failed to serialize {kind} issues"))?;

        // Write through a temp file and rename so readers never see a
        // partially written blob.
        let temp = target.with_extension("json.tmp");
        fs::write(&temp, &data)
            .with_context(|| format!("Failed to write temp file {temp:?}"))?;
        fs::rename(&temp, &target)
            .with_context(|| format!("Failed to rename {temp:?} -> {target:?}"))?;

        log::debug!("Saved {} {} issues to {:?}", report.size(), kind, target);
        Ok(())
    }

    /// Reload one partition from its blob
    pub fn load(&self, kind: PartitionKind) -> Result<Report> {
        let source = self.data_file(kind);
        let data = fs::read(&source)
            .with_context(|| format!("Failed to read data file {source:?}"))?;
        serde_json::from_slice(&data)
            .with_context(|| format!("Failed to decode data file {source:?}"))
    }

    /// Reload one partition, falling back to an empty report.
    ///
    /// Missing blob, I/O error and decode mismatch are all treated the
    /// same: logged at error level, never surfaced to the caller.
    pub fn load_or_empty(&self, kind: PartitionKind) -> Report {
        match self.load(kind) {
            Ok(report) => {
                log::debug!("Loaded {} {} issues for {}", report.size(), kind, self.id);
                report
            }
            Err(error) => {
                log::error!("Failed to load {} issues for {}: {error:#}", kind, self.id);
                Report::default()
            }
        }
    }
}
