//! Map-backed blob store.

use std::collections::HashMap;

use strata_core::{BlobAttributes, BlobId, ContentReference};

use crate::{BlobStore, BlobStoreError};

/// Blob store holding attributes in memory, keyed by blob id.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    name: String,
    blobs: HashMap<BlobId, BlobAttributes>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blobs: HashMap::new(),
        }
    }

    /// Record attributes for `blob_id`, replacing any previous record.
    pub fn insert(&mut self, blob_id: BlobId, attributes: BlobAttributes) {
        self.blobs.insert(blob_id, attributes);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn blob_attributes(
        &self,
        reference: &ContentReference,
    ) -> Result<Option<BlobAttributes>, BlobStoreError> {
        Ok(self.blobs.get(reference.blob_id()).cloned())
    }
}
