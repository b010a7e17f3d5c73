//! A single pass of the default strategy over in-memory collaborators.

use std::cell::Cell;

use pretty_assertions::assert_eq;
use strata_blob::{BlobStore, BlobStoreError, MemoryBlobStore};
use strata_catalog::{CatalogError, CatalogReader, MemoryCatalog};
use strata_core::{
    Asset, BlobAttributes, BlobId, Bucket, Checksum, ContentReference, HashAlgorithm, Repository,
};
use strata_integrity::{
    CollectingReporter, DefaultIntegrityCheckStrategy, Discrepancy, IntegrityCheckStrategy,
    ReportEvent,
};

const H1: &str = "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3";
const H2: &str = "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12";

struct Fixture {
    repository: Repository,
    catalog: MemoryCatalog,
    store: MemoryBlobStore,
}

impl Fixture {
    fn new() -> Self {
        let repository = Repository::new("raw-hosted", "raw", "default");
        let mut catalog = MemoryCatalog::new();
        catalog.register_repository(repository.clone());
        Self {
            repository,
            catalog,
            store: MemoryBlobStore::new("default"),
        }
    }

    /// Catalog an asset and, when `blob` is given, store attributes for it.
    fn add(
        &mut self,
        id: &str,
        asset_name: Option<&str>,
        asset_sha1: Option<&str>,
        blob: Option<BlobAttributes>,
    ) {
        let mut asset = Asset::new(id, "bucket-raw-hosted")
            .with_blob_ref(format!("default@node-1:blob-{id}"));
        asset.name = asset_name.map(str::to_string);
        if let Some(sha1) = asset_sha1 {
            asset = asset.with_checksum(HashAlgorithm::Sha1, Checksum::from_hex(sha1).unwrap());
        }
        self.catalog.add_asset(asset);
        if let Some(attributes) = blob {
            self.store.insert(BlobId::new(format!("blob-{id}")), attributes);
        }
    }

    fn run(&self, cancel: &dyn Fn() -> bool) -> CollectingReporter {
        let mut reporter = CollectingReporter::new();
        DefaultIntegrityCheckStrategy.check(
            &self.repository,
            &self.catalog,
            &self.store,
            &cancel,
            &mut reporter,
        );
        reporter
    }

    fn run_to_completion(&self) -> CollectingReporter {
        self.run(&|| false)
    }
}

fn discrepancies(reporter: &CollectingReporter) -> Vec<(String, Discrepancy)> {
    reporter
        .discrepancies()
        .map(|(id, discrepancy)| (id.to_string(), discrepancy.clone()))
        .collect()
}

#[test]
fn consistent_asset_produces_no_discrepancy() {
    let mut fixture = Fixture::new();
    fixture.add("a1", Some("name"), Some(H1), Some(BlobAttributes::new(Some("name"), H1, 4)));

    let reporter = fixture.run_to_completion();

    assert!(discrepancies(&reporter).is_empty());
    assert_eq!(reporter.asset_ids(), vec!["a1"]);
    assert_eq!(
        reporter.events[0],
        ReportEvent::PassStarted {
            repository: "raw-hosted".into(),
            blob_store: "default".into(),
        }
    );
}

#[test]
fn checksum_mismatch_names_asset_and_both_digests() {
    let mut fixture = Fixture::new();
    fixture.add("a1", Some("name"), Some(H1), Some(BlobAttributes::new(Some("name"), H2, 4)));

    let reporter = fixture.run_to_completion();

    let found = discrepancies(&reporter);
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].1,
        Discrepancy::ChecksumMismatch {
            name: "name".into(),
            algorithm: HashAlgorithm::Sha1,
            asset_checksum: H1.into(),
            blob_checksum: H2.into(),
        }
    );
    let message = found[0].1.to_string();
    assert!(message.contains(H1) && message.contains(H2));
}

#[test]
fn name_mismatch_skips_checksum_comparison() {
    let mut fixture = Fixture::new();
    // Checksums also differ; only the name mismatch may surface.
    fixture.add("a1", Some("aa"), Some(H1), Some(BlobAttributes::new(Some("bb"), H2, 4)));

    let found = discrepancies(&fixture.run_to_completion());

    assert_eq!(
        found,
        vec![(
            "a1".to_string(),
            Discrepancy::NameMismatch {
                asset_name: "aa".into(),
                blob_name: "bb".into(),
            }
        )]
    );
}

#[test]
fn absent_asset_checksum_is_not_a_mismatch() {
    let mut fixture = Fixture::new();
    fixture.add("a1", Some("name"), None, Some(BlobAttributes::new(Some("name"), H1, 4)));

    let found = discrepancies(&fixture.run_to_completion());

    assert_eq!(
        found,
        vec![(
            "a1".to_string(),
            Discrepancy::AssetChecksumMissing {
                algorithm: HashAlgorithm::Sha1
            }
        )]
    );
}

#[test]
fn missing_and_deleted_blobs_are_reported_once_each() {
    let mut fixture = Fixture::new();
    fixture.add("a1", None, None, None);
    fixture.add(
        "a2",
        None,
        None,
        Some(BlobAttributes::new(None, H1, 4).tombstoned("cleanup")),
    );

    let found = discrepancies(&fixture.run_to_completion());

    assert_eq!(
        found,
        vec![
            ("a1".to_string(), Discrepancy::BlobAttributesMissing),
            (
                "a2".to_string(),
                Discrepancy::BlobDeleted {
                    reason: Some("cleanup".into())
                }
            ),
        ]
    );
}

#[test]
fn unresolvable_reference_is_reported_and_pass_continues() {
    let mut fixture = Fixture::new();
    fixture
        .catalog
        .add_asset(Asset::new("a1", "bucket-raw-hosted").with_name("orphan"));
    fixture.add("a2", Some("name"), Some(H1), Some(BlobAttributes::new(Some("name"), H1, 4)));

    let reporter = fixture.run_to_completion();

    assert_eq!(reporter.asset_ids(), vec!["a1", "a2"]);
    let found: Vec<_> = reporter
        .events
        .iter()
        .filter_map(|event| match event {
            ReportEvent::Discrepancy {
                asset, discrepancy, ..
            } => Some((asset.clone(), discrepancy.to_string())),
            _ => None,
        })
        .collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, "asset{id=a1, name=orphan, blob_ref=-}");
    assert!(found[0].1.contains("Missing property: blob_ref"));
}

#[test]
fn cancelled_before_first_asset_reports_once_and_checks_nothing() {
    let mut fixture = Fixture::new();
    for i in 0..50 {
        fixture.add(&format!("a{i:02}"), None, None, None);
    }

    let reporter = fixture.run(&|| true);

    assert_eq!(reporter.cancellations(), 1);
    assert!(reporter.asset_ids().is_empty());
}

#[test]
fn cancellation_mid_pass_stops_before_next_asset() {
    let mut fixture = Fixture::new();
    for id in ["a1", "a2", "a3", "a4"] {
        fixture.add(id, Some("n"), Some(H1), Some(BlobAttributes::new(Some("n"), H1, 1)));
    }

    // One poll before enumeration, then one per asset: cancel on the third asset.
    let polls = Cell::new(0);
    let reporter = fixture.run(&|| {
        polls.set(polls.get() + 1);
        polls.get() > 3
    });

    assert_eq!(reporter.asset_ids(), vec!["a1", "a2"]);
    assert_eq!(reporter.cancellations(), 1);
}

#[test]
fn two_passes_over_unchanged_state_report_identically() {
    let mut fixture = Fixture::new();
    fixture.add("a1", Some("name"), Some(H1), Some(BlobAttributes::new(Some("name"), H2, 4)));
    fixture.add("a2", None, None, None);
    fixture.add("a3", Some("x"), Some(H1), Some(BlobAttributes::new(Some("x"), H1, 4)));

    let first = fixture.run_to_completion();
    let second = fixture.run_to_completion();

    assert_eq!(first.events, second.events);
}

// ---------------------------------------------------------------------------
// Misbehaving collaborators
// ---------------------------------------------------------------------------

/// Fails to read one blob, serves the rest from an inner store.
struct FlakyStore {
    inner: MemoryBlobStore,
    broken: BlobId,
}

impl BlobStore for FlakyStore {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn blob_attributes(
        &self,
        reference: &ContentReference,
    ) -> Result<Option<BlobAttributes>, BlobStoreError> {
        if reference.blob_id() == &self.broken {
            return Err(BlobStoreError::InvalidBlobId(self.broken.to_string()));
        }
        self.inner.blob_attributes(reference)
    }
}

/// Panics on every lookup.
struct PanickingStore;

impl BlobStore for PanickingStore {
    fn name(&self) -> &str {
        "default"
    }

    fn blob_attributes(
        &self,
        _reference: &ContentReference,
    ) -> Result<Option<BlobAttributes>, BlobStoreError> {
        panic!("store exploded")
    }
}

#[test]
fn blob_store_failure_is_unexpected_and_pass_continues() {
    let mut fixture = Fixture::new();
    fixture.add("a1", Some("n"), Some(H1), Some(BlobAttributes::new(Some("n"), H1, 1)));
    fixture.add("a2", Some("n"), Some(H1), Some(BlobAttributes::new(Some("n"), H1, 1)));
    let store = FlakyStore {
        inner: fixture.store.clone(),
        broken: BlobId::new("blob-a1"),
    };

    let mut reporter = CollectingReporter::new();
    DefaultIntegrityCheckStrategy.check(
        &fixture.repository,
        &fixture.catalog,
        &store,
        &|| false,
        &mut reporter,
    );

    let found = discrepancies(&reporter);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, "a1");
    assert!(matches!(found[0].1, Discrepancy::Unexpected { .. }));
    assert_eq!(reporter.asset_ids(), vec!["a1", "a2"]);
}

#[test]
fn panicking_blob_store_is_contained_per_asset() {
    let mut fixture = Fixture::new();
    fixture.add("a1", Some("n"), Some(H1), None);
    fixture.add("a2", Some("n"), Some(H1), None);

    let mut reporter = CollectingReporter::new();
    DefaultIntegrityCheckStrategy.check(
        &fixture.repository,
        &fixture.catalog,
        &PanickingStore,
        &|| false,
        &mut reporter,
    );

    let found = discrepancies(&reporter);
    assert_eq!(found.len(), 2);
    assert_eq!(
        found[0].1,
        Discrepancy::Unexpected {
            detail: "store exploded".into()
        }
    );
}

/// Catalog whose bucket lookup always fails.
struct BrokenCatalog;

impl CatalogReader for BrokenCatalog {
    fn repositories(&self) -> Result<Vec<Repository>, CatalogError> {
        Ok(Vec::new())
    }

    fn find_repository(&self, _name: &str) -> Result<Option<Repository>, CatalogError> {
        Ok(None)
    }

    fn find_bucket(&self, repository: &Repository) -> Result<Bucket, CatalogError> {
        Err(CatalogError::BucketNotFound(repository.name.clone()))
    }

    fn browse_assets(&self, _bucket: &Bucket) -> Result<Vec<Asset>, CatalogError> {
        Ok(Vec::new())
    }
}

#[test]
fn catalog_failure_ends_the_pass() {
    let fixture = Fixture::new();
    let mut reporter = CollectingReporter::new();
    DefaultIntegrityCheckStrategy.check(
        &fixture.repository,
        &BrokenCatalog,
        &fixture.store,
        &|| false,
        &mut reporter,
    );

    assert_eq!(
        reporter.events.last(),
        Some(&ReportEvent::CatalogFailed {
            repository: "raw-hosted".into(),
            error: "Bucket not found for repository: raw-hosted".into(),
        })
    );
    assert!(reporter.asset_ids().is_empty());
}
