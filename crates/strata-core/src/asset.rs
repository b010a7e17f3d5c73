//! Catalog-side asset records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::checksum::{Checksum, HashAlgorithm};
use crate::errors::ReferenceError;
use crate::reference::ContentReference;

/// Catalog record of one logical content item in a repository.
///
/// Every field the catalog may leave unset is optional here; the integrity
/// checker reports absences rather than refusing to load the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub bucket_id: String,
    pub name: Option<String>,
    /// Stored blob reference in `store@node:blob` form.
    pub blob_ref: Option<String>,
    #[serde(default)]
    pub checksums: BTreeMap<HashAlgorithm, Checksum>,
    /// Checksums the catalog stored but that could not be read, with the
    /// reason. Kept apart from absent ones so corruption is not reported as
    /// a missing field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub checksum_errors: BTreeMap<HashAlgorithm, String>,
}

impl Asset {
    #[must_use]
    pub fn new(id: impl Into<String>, bucket_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bucket_id: bucket_id.into(),
            name: None,
            blob_ref: None,
            checksums: BTreeMap::new(),
            checksum_errors: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_blob_ref(mut self, blob_ref: impl Into<String>) -> Self {
        self.blob_ref = Some(blob_ref.into());
        self
    }

    #[must_use]
    pub fn with_checksum(mut self, algorithm: HashAlgorithm, checksum: Checksum) -> Self {
        self.checksums.insert(algorithm, checksum);
        self
    }

    /// Record that the stored `algorithm` checksum is unreadable.
    #[must_use]
    pub fn with_checksum_error(
        mut self,
        algorithm: HashAlgorithm,
        error: impl Into<String>,
    ) -> Self {
        self.checksums.remove(&algorithm);
        self.checksum_errors.insert(algorithm, error.into());
        self
    }

    /// Logical name, if the catalog recorded one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Checksum recorded for `algorithm`, if any.
    #[must_use]
    pub fn checksum(&self, algorithm: HashAlgorithm) -> Option<&Checksum> {
        self.checksums.get(&algorithm)
    }

    /// Why the stored `algorithm` checksum could not be read, if it could not.
    #[must_use]
    pub fn checksum_error(&self, algorithm: HashAlgorithm) -> Option<&str> {
        self.checksum_errors.get(&algorithm).map(String::as_str)
    }

    /// Derive the content reference from the stored blob reference.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::Missing`] if no reference is stored, or
    /// [`ReferenceError::Malformed`] if it cannot be parsed.
    pub fn content_reference(&self) -> Result<ContentReference, ReferenceError> {
        self.blob_ref
            .as_deref()
            .ok_or(ReferenceError::Missing)?
            .parse()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "asset{{id={}, name={}, blob_ref={}}}",
            self.id,
            self.name.as_deref().unwrap_or("-"),
            self.blob_ref.as_deref().unwrap_or("-"),
        )
    }
}
