//! File blob store configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_root() -> String {
    String::from(".strata/blobs")
}

fn default_name() -> String {
    String::from("default")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobStoreConfig {
    /// Directory holding the blob stores, one sub-directory per store name.
    #[serde(default = "default_root")]
    pub root: String,

    /// Blob store checked when no store is named on the command line.
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            name: default_name(),
        }
    }
}

impl BlobStoreConfig {
    /// Directory of the store called `name`.
    pub fn store_dir(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.root).join(name)
    }
}
