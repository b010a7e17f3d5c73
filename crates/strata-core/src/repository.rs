//! Repositories and their asset partitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named repository registered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Repository {
    pub name: String,
    /// Repository format, e.g. `maven2`, `npm`, `raw`.
    pub format: String,
    /// Name of the blob store holding this repository's content.
    pub blob_store: String,
}

impl Repository {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        format: impl Into<String>,
        blob_store: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
            blob_store: blob_store.into(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The catalog partition holding one repository's assets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Bucket {
    pub id: String,
    pub repository_name: String,
}
