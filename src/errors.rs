//! Typed errors for configuration and CLI I/O paths
//!
//! Engine-internal persistence uses `anyhow::Result` with context and
//! degrades locally; the typed variants here surface only where a
//! caller can act on the category (config loading, CLI file handling).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type TrendResult<T> = Result<T, TrendError>;
