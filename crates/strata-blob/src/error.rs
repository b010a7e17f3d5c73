//! Blob store error types.

use std::path::PathBuf;

/// Errors raised while reading blob attributes.
///
/// A blob that simply has no attributes is not an error; stores return
/// `Ok(None)` for that.
#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    /// Reading or writing an attribute file failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An attribute file exists but does not hold valid attributes.
    #[error("Corrupt blob attributes at {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A blob id that cannot name a file inside the store.
    #[error("Invalid blob id: {0}")]
    InvalidBlobId(String),
}
