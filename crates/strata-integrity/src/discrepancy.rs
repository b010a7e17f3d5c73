//! The closed set of ways an asset can disagree with its blob.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use strata_core::{HashAlgorithm, ReferenceError};

/// Why an asset failed its integrity check.
///
/// Variants are ordered the way the check encounters them; only the first
/// failure for an asset is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Discrepancy {
    /// The asset has no usable content reference.
    #[error("Error accessing blob: {0}")]
    ReferenceMissing(ReferenceError),

    /// The blob store has no record for the reference.
    #[error("Blob properties missing for asset")]
    BlobAttributesMissing,

    /// The blob store record is tombstoned.
    #[error("Blob properties marked as deleted for asset")]
    BlobDeleted { reason: Option<String> },

    #[error("Asset name missing")]
    AssetNameMissing,

    #[error("Blob name missing")]
    BlobNameMissing,

    #[error("Asset {algorithm} checksum missing")]
    AssetChecksumMissing { algorithm: HashAlgorithm },

    #[error("Name does not match on asset! Catalog name: '{asset_name}', blob name: '{blob_name}'")]
    NameMismatch {
        asset_name: String,
        blob_name: String,
    },

    #[error(
        "{algorithm} does not match on asset '{name}'! Catalog {algorithm}: '{asset_checksum}', blob {algorithm}: '{blob_checksum}'"
    )]
    ChecksumMismatch {
        name: String,
        algorithm: HashAlgorithm,
        asset_checksum: String,
        blob_checksum: String,
    },

    /// Anything not covered above, e.g. an unreadable blob store record.
    #[error("Error processing asset: {detail}")]
    Unexpected { detail: String },
}

impl Discrepancy {
    #[must_use]
    pub const fn kind(&self) -> DiscrepancyKind {
        match self {
            Self::ReferenceMissing(_) => DiscrepancyKind::ReferenceMissing,
            Self::BlobAttributesMissing => DiscrepancyKind::BlobAttributesMissing,
            Self::BlobDeleted { .. } => DiscrepancyKind::BlobDeleted,
            Self::AssetNameMissing => DiscrepancyKind::AssetNameMissing,
            Self::BlobNameMissing => DiscrepancyKind::BlobNameMissing,
            Self::AssetChecksumMissing { .. } => DiscrepancyKind::AssetChecksumMissing,
            Self::NameMismatch { .. } => DiscrepancyKind::NameMismatch,
            Self::ChecksumMismatch { .. } => DiscrepancyKind::ChecksumMismatch,
            Self::Unexpected { .. } => DiscrepancyKind::Unexpected,
        }
    }
}

/// Fieldless classification of a [`Discrepancy`], used for aggregation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    ReferenceMissing,
    BlobAttributesMissing,
    BlobDeleted,
    AssetNameMissing,
    BlobNameMissing,
    AssetChecksumMissing,
    NameMismatch,
    ChecksumMismatch,
    Unexpected,
}

impl DiscrepancyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReferenceMissing => "reference_missing",
            Self::BlobAttributesMissing => "blob_attributes_missing",
            Self::BlobDeleted => "blob_deleted",
            Self::AssetNameMissing => "asset_name_missing",
            Self::BlobNameMissing => "blob_name_missing",
            Self::AssetChecksumMissing => "asset_checksum_missing",
            Self::NameMismatch => "name_mismatch",
            Self::ChecksumMismatch => "checksum_mismatch",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
