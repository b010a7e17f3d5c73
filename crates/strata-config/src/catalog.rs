//! Metadata catalog location.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from(".strata/catalog.duckdb")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Path to the `DuckDB` catalog file. `:memory:` opens an empty in-memory catalog.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl CatalogConfig {
    /// Whether the catalog lives in memory rather than on disk.
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
