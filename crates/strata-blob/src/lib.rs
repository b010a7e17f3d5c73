//! # strata-blob
//!
//! Read access to content-addressable blob stores.
//!
//! The integrity checker only needs one question answered per asset: what does
//! the store know about the blob behind this [`ContentReference`]? [`BlobStore`]
//! is that seam. Two implementations ship here:
//! - [`FileBlobStore`]: attribute sidecars in a directory tree
//! - [`MemoryBlobStore`]: a map, for tests and embedding

pub mod error;
pub mod file;
pub mod memory;

pub use error::BlobStoreError;
pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use strata_core::{BlobAttributes, ContentReference};

/// A blob store the auditor can query.
pub trait BlobStore: Send + Sync {
    /// Configured name of the store; repositories refer to their store by this name.
    fn name(&self) -> &str;

    /// Attributes of the blob behind `reference`.
    ///
    /// Returns `Ok(None)` when the store has no record of the blob.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError`] when the record exists but cannot be read.
    fn blob_attributes(
        &self,
        reference: &ContentReference,
    ) -> Result<Option<BlobAttributes>, BlobStoreError>;
}
