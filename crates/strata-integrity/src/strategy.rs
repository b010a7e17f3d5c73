//! Integrity check strategies and their per-format registry.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use strata_blob::BlobStore;
use strata_catalog::CatalogReader;
use strata_core::{Asset, BlobAttributes, HashAlgorithm, Repository};

use crate::{CancellationProbe, CheckOutcome, Discrepancy, Reporter, check_asset};

/// Audits one repository's assets against a blob store.
///
/// Implementors normally override only [`Self::check_asset`] (or
/// [`Self::algorithm`]); the provided [`Self::check`] drives the pass.
pub trait IntegrityCheckStrategy: Send + Sync {
    /// Digest compared between catalog and blob store.
    fn algorithm(&self) -> HashAlgorithm {
        BlobAttributes::CAPTURE_ALGORITHM
    }

    /// Check a single asset.
    fn check_asset(&self, asset: &Asset, blob_store: &dyn BlobStore) -> CheckOutcome {
        check_asset(asset, blob_store, self.algorithm())
    }

    /// Run a full pass over `repository`.
    ///
    /// Every asset yields exactly one report unless the pass is cancelled,
    /// in which case the remaining assets yield none and a single
    /// cancellation is reported. A failure on one asset never stops the
    /// pass; a catalog failure ends it.
    fn check(
        &self,
        repository: &Repository,
        catalog: &dyn CatalogReader,
        blob_store: &dyn BlobStore,
        cancel: &dyn CancellationProbe,
        reporter: &mut dyn Reporter,
    ) {
        reporter.pass_started(repository, blob_store.name());

        if cancel.is_cancelled() {
            reporter.cancelled(repository);
            return;
        }

        let assets = match catalog
            .find_bucket(repository)
            .and_then(|bucket| catalog.browse_assets(&bucket))
        {
            Ok(assets) => assets,
            Err(error) => {
                reporter.catalog_failed(repository, &error);
                return;
            }
        };

        for asset in &assets {
            if cancel.is_cancelled() {
                reporter.cancelled(repository);
                return;
            }

            tracing::debug!(%asset, "checking asset");

            let outcome = catch_unwind(AssertUnwindSafe(|| self.check_asset(asset, blob_store)))
                .unwrap_or_else(|payload| {
                    Err(Discrepancy::Unexpected {
                        detail: panic_message(payload.as_ref()),
                    })
                });

            match outcome {
                Ok(()) => reporter.asset_passed(asset),
                Err(discrepancy) => reporter.discrepancy(asset, &discrepancy),
            }
        }
    }
}

/// Compares name and capture-time digest for every asset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIntegrityCheckStrategy;

impl IntegrityCheckStrategy for DefaultIntegrityCheckStrategy {}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic while checking asset".to_string())
}

/// Picks the strategy for a repository by its format.
pub struct StrategyRegistry {
    fallback: Box<dyn IntegrityCheckStrategy>,
    by_format: HashMap<String, Box<dyn IntegrityCheckStrategy>>,
}

impl StrategyRegistry {
    /// Registry that uses `fallback` for every format.
    #[must_use]
    pub fn new(fallback: Box<dyn IntegrityCheckStrategy>) -> Self {
        Self {
            fallback,
            by_format: HashMap::new(),
        }
    }

    /// Use `strategy` for repositories of `format`, replacing any earlier one.
    #[must_use]
    pub fn with_format(
        mut self,
        format: impl Into<String>,
        strategy: Box<dyn IntegrityCheckStrategy>,
    ) -> Self {
        self.by_format.insert(format.into(), strategy);
        self
    }

    #[must_use]
    pub fn strategy_for(&self, repository: &Repository) -> &dyn IntegrityCheckStrategy {
        self.by_format
            .get(&repository.format)
            .map_or(&*self.fallback, |strategy| &**strategy)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new(Box::new(DefaultIntegrityCheckStrategy))
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formats: Vec<&str> = self.by_format.keys().map(String::as_str).collect();
        formats.sort_unstable();
        f.debug_struct("StrategyRegistry")
            .field("formats", &formats)
            .finish_non_exhaustive()
    }
}
