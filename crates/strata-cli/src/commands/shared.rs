use std::path::Path;

use anyhow::Context;
use strata_blob::FileBlobStore;
use strata_catalog::DuckCatalog;
use strata_config::StrataConfig;

/// Open the configured catalog. A missing file is an error, never created.
pub fn open_catalog(config: &StrataConfig) -> anyhow::Result<DuckCatalog> {
    if config.catalog.is_in_memory() {
        return DuckCatalog::open_in_memory().context("failed to open in-memory catalog");
    }

    let path = &config.catalog.path;
    if !Path::new(path).exists() {
        anyhow::bail!("catalog not found at '{path}'");
    }
    DuckCatalog::open(path).with_context(|| format!("failed to open catalog at '{path}'"))
}

/// Open the blob store called `name` under the configured root.
pub fn open_blob_store(config: &StrataConfig, name: &str) -> FileBlobStore {
    FileBlobStore::open(name, config.blob_store.store_dir(name))
}
