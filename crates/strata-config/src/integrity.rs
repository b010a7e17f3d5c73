//! Integrity check reporting policy.

use serde::{Deserialize, Serialize};
use strata_core::Severity;

const fn error() -> Severity {
    Severity::Error
}

const fn warn() -> Severity {
    Severity::Warn
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IntegrityConfig {
    #[serde(default)]
    pub severity: SeverityPolicy,
}

/// Severity at which each report category is emitted.
///
/// A missing blob is an error while a soft-deleted one is only a warning:
/// deletion is an expected state during cleanup, absence is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeverityPolicy {
    #[serde(default = "error")]
    pub reference_missing: Severity,
    #[serde(default = "error")]
    pub blob_missing: Severity,
    #[serde(default = "warn")]
    pub blob_deleted: Severity,
    /// Asset name, blob name or asset checksum absent.
    #[serde(default = "error")]
    pub field_missing: Severity,
    /// Name or checksum mismatch.
    #[serde(default = "error")]
    pub mismatch: Severity,
    #[serde(default = "error")]
    pub unexpected: Severity,
    #[serde(default = "warn")]
    pub cancelled: Severity,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            reference_missing: error(),
            blob_missing: error(),
            blob_deleted: warn(),
            field_missing: error(),
            mismatch: error(),
            unexpected: error(),
            cancelled: warn(),
        }
    }
}
