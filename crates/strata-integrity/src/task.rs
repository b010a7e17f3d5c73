//! Blob-store-wide integrity run.

use schemars::JsonSchema;
use serde::Serialize;
use strata_blob::BlobStore;
use strata_catalog::{CatalogError, CatalogReader};
use strata_core::Repository;

use crate::{CancellationProbe, PassSummary, Reporter, StrategyRegistry, TallyReporter};

/// Outcome of a task run over one blob store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TaskSummary {
    pub blob_store: String,
    /// One entry per repository a pass was started for, in run order.
    pub passes: Vec<PassSummary>,
    /// Repositories never started because the run was cancelled.
    pub skipped: Vec<String>,
}

impl TaskSummary {
    #[must_use]
    pub fn discrepancy_count(&self) -> u64 {
        self.passes.iter().map(PassSummary::discrepancy_count).sum()
    }

    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        !self.skipped.is_empty() || self.passes.iter().any(|pass| pass.cancelled)
    }
}

/// Runs the per-format strategy for repositories of a blob store.
#[derive(Debug, Default)]
pub struct IntegrityCheckTask {
    registry: StrategyRegistry,
}

impl IntegrityCheckTask {
    #[must_use]
    pub const fn new(registry: StrategyRegistry) -> Self {
        Self { registry }
    }

    /// Check every repository stored in `blob_store`, one after another in
    /// name order.
    ///
    /// Cancellation is polled before each repository as well as inside each
    /// pass; once observed, no further pass is started.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the repository list cannot be read.
    /// Failures inside a pass go to `reporter` instead.
    pub fn run(
        &self,
        catalog: &dyn CatalogReader,
        blob_store: &dyn BlobStore,
        cancel: &dyn CancellationProbe,
        reporter: &mut dyn Reporter,
    ) -> Result<TaskSummary, CatalogError> {
        let mut repositories = catalog.repositories_for_blob_store(blob_store.name())?;
        repositories.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::info!(
            blob_store = blob_store.name(),
            repositories = repositories.len(),
            "starting blob store integrity check"
        );

        let mut tally = TallyReporter::new(reporter);
        let mut skipped = Vec::new();

        for repository in repositories {
            if cancel.is_cancelled() {
                skipped.push(repository.name);
                continue;
            }
            self.registry
                .strategy_for(&repository)
                .check(&repository, catalog, blob_store, cancel, &mut tally);
        }

        if !skipped.is_empty() {
            tracing::info!(
                blob_store = blob_store.name(),
                skipped = skipped.len(),
                "integrity check cancelled before all repositories were checked"
            );
        }

        Ok(TaskSummary {
            blob_store: blob_store.name().to_string(),
            passes: tally.into_passes(),
            skipped,
        })
    }

    /// Check a single, already resolved repository.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Other`] if `repository` lives in a different
    /// blob store than `blob_store`.
    pub fn check_repository(
        &self,
        repository: &Repository,
        catalog: &dyn CatalogReader,
        blob_store: &dyn BlobStore,
        cancel: &dyn CancellationProbe,
        reporter: &mut dyn Reporter,
    ) -> Result<PassSummary, CatalogError> {
        if repository.blob_store != blob_store.name() {
            return Err(CatalogError::Other(format!(
                "repository '{}' is stored in blob store '{}', not '{}'",
                repository.name,
                repository.blob_store,
                blob_store.name()
            )));
        }

        let mut tally = TallyReporter::new(reporter);
        self.registry
            .strategy_for(repository)
            .check(repository, catalog, blob_store, cancel, &mut tally);

        tally.into_passes().pop().ok_or_else(|| {
            CatalogError::Other(format!("no pass recorded for '{}'", repository.name))
        })
    }
}
