//! Blob-store-side attribute records.
//!
//! A blob store keeps, next to every stored byte sequence, a small attribute
//! record: free-form headers written by the uploader, metrics captured while
//! the bytes were streamed in, and a soft-delete tombstone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::checksum::HashAlgorithm;

/// Header holding the logical name the blob was written under.
pub const BLOB_NAME_HEADER: &str = "BlobStore.blob-name";

/// Metrics captured while the blob was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMetrics {
    pub creation_time: DateTime<Utc>,
    /// Digest of the stored bytes, computed with [`BlobAttributes::CAPTURE_ALGORITHM`].
    pub sha1: String,
    pub content_size: u64,
}

/// A blob store's recorded facts about one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobAttributes {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub metrics: BlobMetrics,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_reason: Option<String>,
}

impl BlobAttributes {
    /// Algorithm behind [`BlobMetrics::sha1`].
    pub const CAPTURE_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha1;

    /// Attributes for a live blob with the given logical name and digest.
    #[must_use]
    pub fn new(name: Option<&str>, sha1: impl Into<String>, content_size: u64) -> Self {
        let mut headers = BTreeMap::new();
        if let Some(name) = name {
            headers.insert(BLOB_NAME_HEADER.to_string(), name.to_string());
        }
        Self {
            headers,
            metrics: BlobMetrics {
                creation_time: Utc::now(),
                sha1: sha1.into(),
                content_size,
            },
            deleted: false,
            deleted_reason: None,
        }
    }

    /// Mark these attributes as soft-deleted.
    #[must_use]
    pub fn tombstoned(mut self, reason: impl Into<String>) -> Self {
        self.deleted = true;
        self.deleted_reason = Some(reason.into());
        self
    }

    /// Logical name recorded in [`BLOB_NAME_HEADER`].
    #[must_use]
    pub fn logical_name(&self) -> Option<&str> {
        self.headers.get(BLOB_NAME_HEADER).map(String::as_str)
    }

    /// Digest recorded at capture time.
    #[must_use]
    pub fn checksum(&self) -> &str {
        &self.metrics.sha1
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }
}
