//! Content references: the locator binding a catalog asset to a stored blob.
//!
//! The textual form is `store@node:blob`, e.g. `default@node-1:0f5c…`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ReferenceError;

/// Identifier of a blob inside one blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct BlobId(String);

impl BlobId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Locator of a blob: which store, which node wrote it, which blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ContentReference {
    store: String,
    node: String,
    blob: BlobId,
}

impl ContentReference {
    #[must_use]
    pub fn new(store: impl Into<String>, node: impl Into<String>, blob: BlobId) -> Self {
        Self {
            store: store.into(),
            node: node.into(),
            blob,
        }
    }

    /// Name of the blob store holding the blob.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.store
    }

    /// Node that wrote the blob.
    #[must_use]
    pub fn node(&self) -> &str {
        &self.node
    }

    #[must_use]
    pub const fn blob_id(&self) -> &BlobId {
        &self.blob
    }
}

impl fmt::Display for ContentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.store, self.node, self.blob)
    }
}

impl FromStr for ContentReference {
    type Err = ReferenceError;

    /// Parse `store@node:blob`. The store ends at the first `@`, the blob id
    /// starts after the last `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| ReferenceError::Malformed {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (store, rest) = s.split_once('@').ok_or_else(|| malformed("missing '@'"))?;
        let (node, blob) = rest.rsplit_once(':').ok_or_else(|| malformed("missing ':'"))?;

        if store.is_empty() {
            return Err(malformed("empty store"));
        }
        if node.is_empty() {
            return Err(malformed("empty node"));
        }
        if blob.is_empty() {
            return Err(malformed("empty blob id"));
        }

        Ok(Self::new(store, node, BlobId::new(blob)))
    }
}
