//! Directory-backed blob store.
//!
//! Layout of a store rooted at `<root>`:
//!
//! ```text
//! <root>/
//!   content/
//!     <blob-id>.properties.json   # BlobAttributes as JSON
//!     <blob-id>.bytes             # payload (never read by the auditor)
//! ```
//!
//! Only the attribute sidecars are consulted; payload bytes are irrelevant to
//! the catalog comparison.

use std::io::ErrorKind;
use std::path::PathBuf;

use strata_core::{BlobAttributes, BlobId, ContentReference};

use crate::{BlobStore, BlobStoreError};

const CONTENT_DIR: &str = "content";
const ATTRIBUTES_SUFFIX: &str = ".properties.json";

/// Blob store reading attribute sidecars from a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    name: String,
    root: PathBuf,
}

impl FileBlobStore {
    /// Open the store called `name` rooted at `root`.
    ///
    /// The directory does not need to exist; a store without a content
    /// directory simply has no blobs.
    pub fn open(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Path of the attribute sidecar for `blob_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::InvalidBlobId`] if the id could escape the
    /// content directory.
    pub fn attributes_path(&self, blob_id: &BlobId) -> Result<PathBuf, BlobStoreError> {
        let id = blob_id.as_str();
        if id.is_empty()
            || id.contains(['/', '\\'])
            || id == "."
            || id == ".."
            || id.contains('\0')
        {
            return Err(BlobStoreError::InvalidBlobId(id.to_string()));
        }
        Ok(self
            .root
            .join(CONTENT_DIR)
            .join(format!("{id}{ATTRIBUTES_SUFFIX}")))
    }

    /// Write (or replace) the attribute sidecar for `blob_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] if the content directory or file cannot be written.
    pub fn put_attributes(
        &self,
        blob_id: &BlobId,
        attributes: &BlobAttributes,
    ) -> Result<(), BlobStoreError> {
        let path = self.attributes_path(blob_id)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| BlobStoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_vec_pretty(attributes).map_err(|source| {
            BlobStoreError::Decode {
                path: path.clone(),
                source,
            }
        })?;
        std::fs::write(&path, json).map_err(|source| BlobStoreError::Io { path, source })
    }
}

impl BlobStore for FileBlobStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn blob_attributes(
        &self,
        reference: &ContentReference,
    ) -> Result<Option<BlobAttributes>, BlobStoreError> {
        let path = self.attributes_path(reference.blob_id())?;

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::trace!(path = %path.display(), "no blob attributes on disk");
                return Ok(None);
            }
            Err(source) => return Err(BlobStoreError::Io { path, source }),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| BlobStoreError::Decode { path, source })
    }
}
