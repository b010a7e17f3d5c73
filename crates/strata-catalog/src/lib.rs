//! # strata-catalog
//!
//! Read access to the repository metadata catalog.
//!
//! The catalog owns three record kinds: repositories, one bucket (asset
//! partition) per repository, and the assets inside each bucket. The
//! integrity checker consumes them through [`CatalogReader`]:
//! - [`DuckCatalog`]: a `DuckDB` file (or in-memory database)
//! - [`MemoryCatalog`]: plain maps, for tests and embedding

pub mod duck;
pub mod error;
pub mod memory;

pub use duck::DuckCatalog;
pub use error::CatalogError;
pub use memory::MemoryCatalog;

use strata_core::{Asset, Bucket, Repository};

/// Read-only view of the metadata catalog.
pub trait CatalogReader {
    /// All registered repositories, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be queried.
    fn repositories(&self) -> Result<Vec<Repository>, CatalogError>;

    /// Look a repository up by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be queried.
    fn find_repository(&self, name: &str) -> Result<Option<Repository>, CatalogError>;

    /// The asset partition of `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BucketNotFound`] if the repository has none.
    fn find_bucket(&self, repository: &Repository) -> Result<Bucket, CatalogError>;

    /// Every asset in `bucket`, ordered by id, without duplicates.
    ///
    /// The returned list is a snapshot; later catalog writes do not affect it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be queried.
    fn browse_assets(&self, bucket: &Bucket) -> Result<Vec<Asset>, CatalogError>;

    /// Repositories whose content lives in the blob store called `blob_store`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be queried.
    fn repositories_for_blob_store(&self, blob_store: &str) -> Result<Vec<Repository>, CatalogError> {
        Ok(self
            .repositories()?
            .into_iter()
            .filter(|repository| repository.blob_store == blob_store)
            .collect())
    }
}

/// Bucket id assigned to a repository's partition.
#[must_use]
pub fn bucket_id_for(repository_name: &str) -> String {
    format!("bucket-{repository_name}")
}
