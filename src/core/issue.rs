//! Issue model: one finding reported by a static analysis tool

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::core::Severity;

/// A single finding, immutable once built.
///
/// Identity across builds is the fingerprint: two issues with equal
/// fingerprints are the same issue even when message text or line
/// numbers drifted between builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    fingerprint: String,
    severity: Severity,
    origin: String,
    file: PathBuf,
    line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    module: Option<String>,
    message: String,
    /// Build number where this issue was first observed, stamped by
    /// the differencer when the issue shows up as new.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_seen: Option<u32>,
}

impl Issue {
    pub fn builder() -> IssueBuilder {
        IssueBuilder::default()
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn first_seen(&self) -> Option<u32> {
        self.first_seen
    }

    /// Copy of this issue stamped with the build it first appeared in
    pub fn with_first_seen(&self, build_number: u32) -> Issue {
        Issue {
            first_seen: Some(build_number),
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}:{} - {}",
            self.severity,
            self.file.display(),
            self.line,
            self.message
        )
    }
}

/// Builder for [`Issue`]
///
/// When no fingerprint is supplied, a stable digest over origin, file,
/// line and message is derived so every issue carries an identity.
#[derive(Debug, Clone, Default)]
pub struct IssueBuilder {
    fingerprint: Option<String>,
    severity: Option<Severity>,
    origin: Option<String>,
    file: Option<PathBuf>,
    line: usize,
    module: Option<String>,
    message: Option<String>,
}

impl IssueBuilder {
    pub fn fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn build(self) -> Issue {
        let origin = self.origin.unwrap_or_else(|| "unknown".to_string());
        let file = self.file.unwrap_or_else(|| PathBuf::from("-"));
        let message = self.message.unwrap_or_default();
        let fingerprint = self
            .fingerprint
            .unwrap_or_else(|| digest_fingerprint(&origin, &file, self.line, &message));

        Issue {
            fingerprint,
            severity: self.severity.unwrap_or(Severity::WarningNormal),
            origin,
            file,
            line: self.line,
            module: self.module,
            message,
            first_seen: None,
        }
    }
}

/// SHA-256 digest over the identifying fields of an issue
fn digest_fingerprint(origin: &str, file: &Path, line: usize, message: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(origin.as_bytes());
    hasher.update(file.to_string_lossy().as_bytes());
    hasher.update(line.to_le_bytes());
    hasher.update(message.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_derives_fingerprint_when_missing() {
        let a = Issue::builder()
            .origin("lint")
            .file("src/lib.rs")
            .line(10)
            .message("unused import")
            .build();
        let b = Issue::builder()
            .origin("lint")
            .file("src/lib.rs")
            .line(10)
            .message("unused import")
            .build();

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert!(!a.fingerprint().is_empty());
    }

    #[test]
    fn explicit_fingerprint_wins() {
        let issue = Issue::builder()
            .fingerprint("fp-1")
            .message("anything")
            .build();
        assert_eq!(issue.fingerprint(), "fp-1");
    }

    #[test]
    fn builder_carries_optional_module() {
        let issue = Issue::builder()
            .fingerprint("fp-1")
            .module("core")
            .build();
        assert_eq!(issue.module(), Some("core"));
        assert_eq!(Issue::builder().fingerprint("fp-2").build().module(), None);
    }

    #[test]
    fn with_first_seen_stamps_build_number() {
        let issue = Issue::builder().fingerprint("fp-1").build();
        assert_eq!(issue.first_seen(), None);

        let stamped = issue.with_first_seen(7);
        assert_eq!(stamped.first_seen(), Some(7));
        assert_eq!(stamped.fingerprint(), "fp-1");
    }
}
