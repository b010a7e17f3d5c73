//! Map-backed catalog.

use std::collections::BTreeMap;

use strata_core::{Asset, Bucket, Repository};

use crate::{CatalogError, CatalogReader, bucket_id_for};

/// In-memory catalog. Assets are keyed by id, so re-adding an asset replaces it.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    repositories: BTreeMap<String, Repository>,
    assets: BTreeMap<String, BTreeMap<String, Asset>>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repository and return its bucket.
    pub fn register_repository(&mut self, repository: Repository) -> Bucket {
        let bucket = Bucket {
            id: bucket_id_for(&repository.name),
            repository_name: repository.name.clone(),
        };
        self.assets.entry(bucket.id.clone()).or_default();
        self.repositories.insert(repository.name.clone(), repository);
        bucket
    }

    /// Add an asset to the bucket named by `asset.bucket_id`.
    pub fn add_asset(&mut self, asset: Asset) {
        self.assets
            .entry(asset.bucket_id.clone())
            .or_default()
            .insert(asset.id.clone(), asset);
    }
}

impl CatalogReader for MemoryCatalog {
    fn repositories(&self) -> Result<Vec<Repository>, CatalogError> {
        Ok(self.repositories.values().cloned().collect())
    }

    fn find_repository(&self, name: &str) -> Result<Option<Repository>, CatalogError> {
        Ok(self.repositories.get(name).cloned())
    }

    fn find_bucket(&self, repository: &Repository) -> Result<Bucket, CatalogError> {
        if !self.repositories.contains_key(&repository.name) {
            return Err(CatalogError::BucketNotFound(repository.name.clone()));
        }
        Ok(Bucket {
            id: bucket_id_for(&repository.name),
            repository_name: repository.name.clone(),
        })
    }

    fn browse_assets(&self, bucket: &Bucket) -> Result<Vec<Asset>, CatalogError> {
        Ok(self
            .assets
            .get(&bucket.id)
            .map(|assets| assets.values().cloned().collect())
            .unwrap_or_default())
    }
}
