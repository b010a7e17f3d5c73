//! Catalog error types.

/// Errors that can occur while reading or seeding the metadata catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// `DuckDB` operation failed.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// The repository is not registered in the catalog.
    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    /// The repository exists but has no asset partition.
    #[error("Bucket not found for repository: {0}")]
    BucketNotFound(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(String),
}
