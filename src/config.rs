//! Quality gate configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{TrendError, TrendResult};

/// Thresholds driving the built-in threshold gate.
///
/// Every threshold is optional; a gate with no thresholds set is
/// disabled. Reaching a threshold (>=) triggers the corresponding
/// outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Total issue count that marks the build unstable
    #[serde(default)]
    pub unstable_total: Option<usize>,

    /// Total issue count that fails the build
    #[serde(default)]
    pub failed_total: Option<usize>,

    /// New issue count that marks the build unstable
    #[serde(default)]
    pub unstable_new: Option<usize>,

    /// New issue count that fails the build
    #[serde(default)]
    pub failed_new: Option<usize>,
}

impl GateConfig {
    /// A gate is enabled once any threshold is configured
    pub fn is_enabled(&self) -> bool {
        self.unstable_total.is_some()
            || self.failed_total.is_some()
            || self.unstable_new.is_some()
            || self.failed_new.is_some()
    }

    /// Load gate thresholds from a TOML file
    pub fn from_file(path: &Path) -> TrendResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| TrendError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: GateConfig = toml::from_str(&content)
            .map_err(|e| TrendError::Config(format!("invalid gate config {path:?}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that failed thresholds are not stricter than unstable ones
    pub fn validate(&self) -> TrendResult<()> {
        Self::validate_pair("total", self.unstable_total, self.failed_total)?;
        Self::validate_pair("new", self.unstable_new, self.failed_new)
    }

    fn validate_pair(
        label: &str,
        unstable: Option<usize>,
        failed: Option<usize>,
    ) -> TrendResult<()> {
        match (unstable, failed) {
            (Some(u), Some(f)) if f < u => Err(TrendError::Config(format!(
                "failed_{label} ({f}) must not be below unstable_{label} ({u})"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn empty_config_is_disabled() {
        assert!(!GateConfig::default().is_enabled());
    }

    #[test]
    fn any_threshold_enables_the_gate() {
        let config = GateConfig {
            unstable_new: Some(1),
            ..GateConfig::default()
        };
        assert!(config.is_enabled());
    }

    #[test]
    fn from_file_parses_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gate.toml");
        fs::write(
            &path,
            indoc! {r#"
                unstable_total = 10
                failed_total = 20
                failed_new = 5
            "#},
        )
        .unwrap();

        let config = GateConfig::from_file(&path).unwrap();
        assert_eq!(config.unstable_total, Some(10));
        assert_eq!(config.failed_total, Some(20));
        assert_eq!(config.unstable_new, None);
        assert_eq!(config.failed_new, Some(5));
    }

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let config = GateConfig {
            unstable_total: Some(20),
            failed_total: Some(10),
            ..GateConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_file_reports_missing_file() {
        let err = GateConfig::from_file(Path::new("/nonexistent/gate.toml")).unwrap_err();
        assert!(matches!(err, TrendError::Io { .. }));
    }
}
