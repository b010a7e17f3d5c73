//! `DuckDB`-backed catalog.
//!
//! Tables:
//! - `repositories`: name, format, blob store name
//! - `buckets`: one asset partition per repository
//! - `assets`: catalog records; `checksums` is a JSON object keyed by algorithm
//!
//! Writes exist only to seed the catalog; the auditor itself never writes.

use std::collections::BTreeMap;

use duckdb::{Connection, params};
use strata_core::{Asset, Bucket, Checksum, HashAlgorithm, Repository};

use crate::{CatalogError, CatalogReader, bucket_id_for};

/// DDL for the catalog tables.
const CREATE_CATALOG: &str = "
CREATE TABLE IF NOT EXISTS repositories (
    name TEXT PRIMARY KEY,
    format TEXT NOT NULL,
    blob_store TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS buckets (
    id TEXT PRIMARY KEY,
    repository_name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS assets (
    id TEXT PRIMARY KEY,
    bucket_id TEXT NOT NULL,
    name TEXT,
    blob_ref TEXT,
    checksums TEXT NOT NULL DEFAULT '{}'
);
";

/// Metadata catalog stored in a `DuckDB` file.
pub struct DuckCatalog {
    conn: Connection,
}

impl DuckCatalog {
    /// Open or create a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuckDb`] if the file cannot be opened or schema creation fails.
    pub fn open(path: &str) -> Result<Self, CatalogError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(CREATE_CATALOG)?;
        Ok(Self { conn })
    }

    /// Open an empty in-memory catalog (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuckDb`] if schema creation fails.
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_CATALOG)?;
        Ok(Self { conn })
    }

    /// Register (or re-register) a repository and make sure it has a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuckDb`] if an INSERT fails.
    pub fn register_repository(&self, repository: &Repository) -> Result<Bucket, CatalogError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO repositories (name, format, blob_store) VALUES (?, ?, ?)",
            params![repository.name, repository.format, repository.blob_store],
        )?;

        let bucket = Bucket {
            id: bucket_id_for(&repository.name),
            repository_name: repository.name.clone(),
        };
        self.conn.execute(
            "INSERT OR IGNORE INTO buckets (id, repository_name) VALUES (?, ?)",
            params![bucket.id, bucket.repository_name],
        )?;
        Ok(bucket)
    }

    /// Store assets, replacing any existing record with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuckDb`] if any INSERT fails.
    pub fn store_assets(&self, assets: &[Asset]) -> Result<(), CatalogError> {
        let mut stmt = self.conn.prepare(
            "INSERT OR REPLACE INTO assets (id, bucket_id, name, blob_ref, checksums)
             VALUES (?, ?, ?, ?, ?)",
        )?;

        for asset in assets {
            let checksums = serde_json::to_string(&asset.checksums)
                .map_err(|error| CatalogError::Other(format!("encode checksums: {error}")))?;
            stmt.execute(params![
                asset.id,
                asset.bucket_id,
                asset.name,
                asset.blob_ref,
                checksums,
            ])?;
        }

        Ok(())
    }

    /// Access the underlying `DuckDB` connection.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl CatalogReader for DuckCatalog {
    fn repositories(&self) -> Result<Vec<Repository>, CatalogError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, format, blob_store FROM repositories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Repository {
                name: row.get(0)?,
                format: row.get(1)?,
                blob_store: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn find_repository(&self, name: &str) -> Result<Option<Repository>, CatalogError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, format, blob_store FROM repositories WHERE name = ?")?;
        let mut rows = stmt.query_map(params![name], |row| {
            Ok(Repository {
                name: row.get(0)?,
                format: row.get(1)?,
                blob_store: row.get(2)?,
            })
        })?;
        Ok(rows.next().transpose()?)
    }

    fn find_bucket(&self, repository: &Repository) -> Result<Bucket, CatalogError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, repository_name FROM buckets WHERE repository_name = ?")?;
        let mut rows = stmt.query_map(params![repository.name], |row| {
            Ok(Bucket {
                id: row.get(0)?,
                repository_name: row.get(1)?,
            })
        })?;
        rows.next()
            .transpose()?
            .ok_or_else(|| CatalogError::BucketNotFound(repository.name.clone()))
    }

    fn browse_assets(&self, bucket: &Bucket) -> Result<Vec<Asset>, CatalogError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, bucket_id, name, blob_ref, checksums
             FROM assets WHERE bucket_id = ? ORDER BY id",
        )?;
        let rows = stmt.query_map(params![bucket.id], |row| {
            let id: String = row.get(0)?;
            let bucket_id: String = row.get(1)?;
            let name: Option<String> = row.get(2)?;
            let blob_ref: Option<String> = row.get(3)?;
            let checksums: String = row.get(4)?;
            Ok((id, bucket_id, name, blob_ref, checksums))
        })?;

        let mut assets = Vec::new();
        for row in rows {
            let (id, bucket_id, name, blob_ref, raw_checksums) = row?;
            let (checksums, checksum_errors) = decode_checksums(&id, &raw_checksums);
            assets.push(Asset {
                id,
                bucket_id,
                name,
                blob_ref,
                checksums,
                checksum_errors,
            });
        }
        Ok(assets)
    }
}

/// Checksums that decoded, and the reason for each that did not.
type DecodedChecksums = (
    BTreeMap<HashAlgorithm, Checksum>,
    BTreeMap<HashAlgorithm, String>,
);

/// Decode the `checksums` column leniently.
///
/// A value that is not valid hex is kept as an error for its algorithm, so
/// the checker reports catalog corruption rather than a missing checksum. A
/// column that is not a JSON object marks every algorithm unreadable.
/// Entries for unknown algorithms are dropped with a warning.
fn decode_checksums(asset_id: &str, raw: &str) -> DecodedChecksums {
    let mut checksums = BTreeMap::new();
    let mut errors = BTreeMap::new();

    let entries: BTreeMap<String, String> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(asset = asset_id, %error, "undecodable checksums column");
            for algorithm in HashAlgorithm::ALL {
                errors.insert(algorithm, format!("undecodable checksums column: {error}"));
            }
            return (checksums, errors);
        }
    };

    for (name, value) in entries {
        let algorithm = match name.parse::<HashAlgorithm>() {
            Ok(algorithm) => algorithm,
            Err(error) => {
                tracing::warn!(
                    asset = asset_id,
                    algorithm = %name,
                    %error,
                    "dropping checksum of unknown algorithm"
                );
                continue;
            }
        };
        match Checksum::from_hex(&value) {
            Ok(checksum) => {
                checksums.insert(algorithm, checksum);
            }
            Err(error) => {
                tracing::warn!(asset = asset_id, %algorithm, %error, "unreadable checksum entry");
                errors.insert(algorithm, error.to_string());
            }
        }
    }
    (checksums, errors)
}
