// Export modules for library usage
pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod diff;
pub mod errors;
pub mod gate;
pub mod io;
pub mod result;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{BuildOutcome, Issue, IssueBuilder, Report, Severity};

pub use crate::cache::PartitionCache;

pub use crate::config::GateConfig;

pub use crate::diff::IssueDifference;

pub use crate::errors::{TrendError, TrendResult};

pub use crate::gate::{GateEvaluation, IssueMetrics, NoGate, QualityGate, ThresholdGate};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::result::{
    AnalysisBuild, AnalysisResult, NullReferenceProvider, ReferenceId, ReferenceProvider,
};

pub use crate::storage::{PartitionKind, ResultStore};
