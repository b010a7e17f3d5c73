//! Cross-cutting error types for Strata.
//!
//! Domain-specific errors (e.g., `CatalogError`, `BlobStoreError`) are defined in
//! their respective crates.

use thiserror::Error;

/// Errors that can be raised by any Strata crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failure to derive a [`ContentReference`](crate::ContentReference) from an asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The asset carries no blob reference at all.
    #[error("Missing property: blob_ref")]
    Missing,

    /// The stored reference does not have the `store@node:blob` shape.
    #[error("Malformed blob reference '{value}': {reason}")]
    Malformed { value: String, reason: String },
}
