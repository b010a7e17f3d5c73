//! Strategy selection and blob-store-wide runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use strata_blob::{BlobStore, MemoryBlobStore};
use strata_catalog::{CatalogError, CatalogReader, MemoryCatalog};
use strata_core::{Asset, BlobAttributes, BlobId, Bucket, Checksum, HashAlgorithm, Repository};
use strata_integrity::{
    CancellationProbe, CancellationToken, CheckOutcome, CollectingReporter, Discrepancy,
    DiscrepancyKind, IntegrityCheckStrategy, IntegrityCheckTask, ReportEvent, StrategyRegistry,
};

const H1: &str = "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3";

/// Flags every asset it sees and counts them.
struct FlagEverything {
    seen: Arc<AtomicUsize>,
}

impl IntegrityCheckStrategy for FlagEverything {
    fn check_asset(&self, _asset: &Asset, _blob_store: &dyn BlobStore) -> CheckOutcome {
        self.seen.fetch_add(1, Ordering::SeqCst);
        Err(Discrepancy::Unexpected {
            detail: "flagged".into(),
        })
    }
}

fn catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    for (name, format, store) in [
        ("npm-hosted", "npm", "default"),
        ("maven-releases", "maven2", "default"),
        ("raw-archive", "raw", "cold"),
    ] {
        let bucket = catalog.register_repository(Repository::new(name, format, store));
        catalog.add_asset(
            Asset::new(format!("{name}-1"), bucket.id)
                .with_name("file")
                .with_blob_ref(format!("{store}@node-1:{name}-1"))
                .with_checksum(HashAlgorithm::Sha1, Checksum::from_hex(H1).unwrap()),
        );
    }
    catalog
}

fn store() -> MemoryBlobStore {
    let mut store = MemoryBlobStore::new("default");
    for id in ["npm-hosted-1", "maven-releases-1"] {
        store.insert(BlobId::new(id), BlobAttributes::new(Some("file"), H1, 3));
    }
    store
}

#[test]
fn registry_uses_format_strategy_and_falls_back() {
    let seen = Arc::new(AtomicUsize::new(0));
    let registry = StrategyRegistry::default().with_format(
        "npm",
        Box::new(FlagEverything {
            seen: Arc::clone(&seen),
        }),
    );
    let task = IntegrityCheckTask::new(registry);
    let mut reporter = CollectingReporter::new();

    let summary = task
        .run(&catalog(), &store(), &|| false, &mut reporter)
        .unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 1);
    let by_repository: Vec<(&str, u64)> = summary
        .passes
        .iter()
        .map(|pass| (pass.repository.as_str(), pass.discrepancy_count()))
        .collect();
    assert_eq!(by_repository, vec![("maven-releases", 0), ("npm-hosted", 1)]);
}

#[test]
fn task_visits_only_repositories_of_its_blob_store_in_name_order() {
    let task = IntegrityCheckTask::default();
    let mut reporter = CollectingReporter::new();

    let summary = task
        .run(&catalog(), &store(), &|| false, &mut reporter)
        .unwrap();

    let started: Vec<&str> = reporter
        .events
        .iter()
        .filter_map(|event| match event {
            ReportEvent::PassStarted { repository, .. } => Some(repository.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec!["maven-releases", "npm-hosted"]);
    assert_eq!(summary.blob_store, "default");
    assert!(summary.passes.iter().all(|pass| pass.is_clean()));
    assert_eq!(summary.discrepancy_count(), 0);
    assert!(!summary.was_cancelled());
}

#[test]
fn cancelled_token_skips_every_repository() {
    let token = CancellationToken::new();
    token.cancel();
    let mut reporter = CollectingReporter::new();

    let summary = IntegrityCheckTask::default()
        .run(&catalog(), &store(), &token, &mut reporter)
        .unwrap();

    assert!(summary.passes.is_empty());
    assert_eq!(summary.skipped, vec!["maven-releases", "npm-hosted"]);
    assert!(summary.was_cancelled());
    assert!(reporter.events.is_empty());
}

/// Answers `false` until it has been polled `limit` times.
struct CancelAfter {
    polls: AtomicUsize,
    limit: usize,
}

impl CancellationProbe for CancelAfter {
    fn is_cancelled(&self) -> bool {
        self.polls.fetch_add(1, Ordering::SeqCst) >= self.limit
    }
}

#[test]
fn cancellation_during_first_pass_skips_the_rest() {
    // Polls: task (1), pass start (2), first asset (3) -> cancelled.
    let cancel = CancelAfter {
        polls: AtomicUsize::new(0),
        limit: 2,
    };
    let mut reporter = CollectingReporter::new();

    let summary = IntegrityCheckTask::default()
        .run(&catalog(), &store(), &cancel, &mut reporter)
        .unwrap();

    assert_eq!(summary.passes.len(), 1);
    assert!(summary.passes[0].cancelled);
    assert_eq!(summary.passes[0].checked, 0);
    assert_eq!(summary.skipped, vec!["npm-hosted"]);
    assert_eq!(reporter.cancellations(), 1);
}

/// Delegates to a [`MemoryCatalog`] and counts repository lookups.
struct CountingLookups {
    inner: MemoryCatalog,
    lookups: AtomicUsize,
}

impl CatalogReader for CountingLookups {
    fn repositories(&self) -> Result<Vec<Repository>, CatalogError> {
        self.inner.repositories()
    }

    fn find_repository(&self, name: &str) -> Result<Option<Repository>, CatalogError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_repository(name)
    }

    fn find_bucket(&self, repository: &Repository) -> Result<Bucket, CatalogError> {
        self.inner.find_bucket(repository)
    }

    fn browse_assets(&self, bucket: &Bucket) -> Result<Vec<Asset>, CatalogError> {
        self.inner.browse_assets(bucket)
    }
}

fn maven_releases() -> Repository {
    Repository::new("maven-releases", "maven2", "default")
}

#[test]
fn check_repository_returns_its_pass() {
    let mut blobs = store();
    blobs.insert(
        BlobId::new("maven-releases-1"),
        BlobAttributes::new(Some("file"), H1, 3).tombstoned("purged"),
    );
    let mut reporter = CollectingReporter::new();

    let pass = IntegrityCheckTask::default()
        .check_repository(&maven_releases(), &catalog(), &blobs, &|| false, &mut reporter)
        .unwrap();

    assert_eq!(pass.repository, "maven-releases");
    assert_eq!(pass.checked, 1);
    assert_eq!(pass.discrepancies.get(&DiscrepancyKind::BlobDeleted), Some(&1));
}

#[test]
fn check_repository_does_not_look_the_repository_up_again() {
    let catalog = CountingLookups {
        inner: catalog(),
        lookups: AtomicUsize::new(0),
    };
    let repository = catalog.find_repository("maven-releases").unwrap().unwrap();
    let mut reporter = CollectingReporter::new();

    let pass = IntegrityCheckTask::default()
        .check_repository(&repository, &catalog, &store(), &|| false, &mut reporter)
        .unwrap();

    assert!(pass.is_clean());
    assert_eq!(catalog.lookups.load(Ordering::SeqCst), 1);
}

#[test]
fn check_repository_rejects_foreign_repositories() {
    let task = IntegrityCheckTask::default();
    let catalog = catalog();
    let archive = catalog.find_repository("raw-archive").unwrap().unwrap();
    let mut reporter = CollectingReporter::new();

    let foreign = task.check_repository(&archive, &catalog, &store(), &|| false, &mut reporter);

    assert!(matches!(foreign, Err(CatalogError::Other(_))));
    assert!(reporter.events.is_empty());
}

#[test]
fn repositories_for_blob_store_filters_by_name() {
    let names: Vec<String> = catalog()
        .repositories_for_blob_store("cold")
        .unwrap()
        .into_iter()
        .map(|repository| repository.name)
        .collect();
    assert_eq!(names, vec!["raw-archive"]);
}
