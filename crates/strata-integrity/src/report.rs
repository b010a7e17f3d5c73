//! Where check outcomes go.
//!
//! The checker never returns per-asset results; it hands every outcome to a
//! [`Reporter`]. [`TracingReporter`] turns them into log events at the
//! configured severity, [`TallyReporter`] aggregates them into
//! [`PassSummary`] values, and [`CollectingReporter`] records them verbatim
//! for tests.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Serialize;
use strata_catalog::CatalogError;
use strata_config::SeverityPolicy;
use strata_core::{Asset, Repository, Severity};

use crate::{Discrepancy, DiscrepancyKind};

/// Sink for the outcomes of integrity passes.
pub trait Reporter {
    /// A pass over `repository` is starting.
    fn pass_started(&mut self, repository: &Repository, blob_store: &str);

    /// `asset` agrees with its blob.
    fn asset_passed(&mut self, _asset: &Asset) {}

    /// `asset` failed its check.
    fn discrepancy(&mut self, asset: &Asset, discrepancy: &Discrepancy);

    /// The pass over `repository` stopped early on request.
    fn cancelled(&mut self, repository: &Repository);

    /// The catalog could not enumerate `repository`; the pass ends here.
    fn catalog_failed(&mut self, repository: &Repository, error: &CatalogError);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn pass_started(&mut self, repository: &Repository, blob_store: &str) {
        (**self).pass_started(repository, blob_store);
    }

    fn asset_passed(&mut self, asset: &Asset) {
        (**self).asset_passed(asset);
    }

    fn discrepancy(&mut self, asset: &Asset, discrepancy: &Discrepancy) {
        (**self).discrepancy(asset, discrepancy);
    }

    fn cancelled(&mut self, repository: &Repository) {
        (**self).cancelled(repository);
    }

    fn catalog_failed(&mut self, repository: &Repository, error: &CatalogError) {
        (**self).catalog_failed(repository, error);
    }
}

/// Severity the policy assigns to a discrepancy kind.
#[must_use]
pub const fn severity_for(policy: &SeverityPolicy, kind: DiscrepancyKind) -> Severity {
    match kind {
        DiscrepancyKind::ReferenceMissing => policy.reference_missing,
        DiscrepancyKind::BlobAttributesMissing => policy.blob_missing,
        DiscrepancyKind::BlobDeleted => policy.blob_deleted,
        DiscrepancyKind::AssetNameMissing
        | DiscrepancyKind::BlobNameMissing
        | DiscrepancyKind::AssetChecksumMissing => policy.field_missing,
        DiscrepancyKind::NameMismatch | DiscrepancyKind::ChecksumMismatch => policy.mismatch,
        DiscrepancyKind::Unexpected => policy.unexpected,
    }
}

/// Emit a tracing event at a level chosen at runtime.
macro_rules! event_at {
    ($severity:expr, $($arg:tt)+) => {
        match $severity {
            Severity::Trace => tracing::trace!($($arg)+),
            Severity::Debug => tracing::debug!($($arg)+),
            Severity::Info => tracing::info!($($arg)+),
            Severity::Warn => tracing::warn!($($arg)+),
            Severity::Error => tracing::error!($($arg)+),
        }
    };
}

// ---------------------------------------------------------------------------
// TracingReporter
// ---------------------------------------------------------------------------

/// Logs every outcome through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingReporter {
    policy: SeverityPolicy,
}

impl TracingReporter {
    #[must_use]
    pub const fn new(policy: SeverityPolicy) -> Self {
        Self { policy }
    }
}

impl Reporter for TracingReporter {
    fn pass_started(&mut self, repository: &Repository, blob_store: &str) {
        tracing::info!(
            repository = %repository.name,
            blob_store,
            "Checking integrity of assets in repository '{}' with blob store '{}'",
            repository.name,
            blob_store
        );
    }

    fn discrepancy(&mut self, asset: &Asset, discrepancy: &Discrepancy) {
        let kind = discrepancy.kind();
        match discrepancy {
            Discrepancy::BlobDeleted { reason } => event_at!(
                severity_for(&self.policy, kind),
                kind = kind.as_str(),
                reason = reason.as_deref().unwrap_or("-"),
                "{discrepancy} {asset}"
            ),
            _ => event_at!(
                severity_for(&self.policy, kind),
                kind = kind.as_str(),
                "{discrepancy} {asset}"
            ),
        }
    }

    fn cancelled(&mut self, repository: &Repository) {
        event_at!(
            self.policy.cancelled,
            repository = %repository.name,
            "Cancelling blob integrity check"
        );
    }

    fn catalog_failed(&mut self, repository: &Repository, error: &CatalogError) {
        tracing::error!(
            repository = %repository.name,
            %error,
            "Unable to enumerate assets; skipping repository"
        );
    }
}

// ---------------------------------------------------------------------------
// TallyReporter
// ---------------------------------------------------------------------------

/// One reported discrepancy, flattened for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Finding {
    pub asset_id: String,
    pub asset: String,
    pub kind: DiscrepancyKind,
    pub message: String,
}

/// Aggregate result of one pass over one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct PassSummary {
    pub repository: String,
    pub blob_store: String,
    /// Assets whose check ran to an outcome.
    pub checked: u64,
    pub passed: u64,
    pub discrepancies: BTreeMap<DiscrepancyKind, u64>,
    pub findings: Vec<Finding>,
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_error: Option<String>,
}

impl PassSummary {
    fn new(repository: &Repository, blob_store: &str) -> Self {
        Self {
            repository: repository.name.clone(),
            blob_store: blob_store.to_string(),
            checked: 0,
            passed: 0,
            discrepancies: BTreeMap::new(),
            findings: Vec::new(),
            cancelled: false,
            catalog_error: None,
        }
    }

    /// Total discrepancies across all kinds.
    #[must_use]
    pub fn discrepancy_count(&self) -> u64 {
        self.discrepancies.values().sum()
    }

    /// Ran to completion without a single discrepancy.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.cancelled && self.catalog_error.is_none() && self.discrepancies.is_empty()
    }
}

/// Counts outcomes per pass and forwards everything to an inner reporter.
#[derive(Debug, Default)]
pub struct TallyReporter<R> {
    inner: R,
    passes: Vec<PassSummary>,
}

impl<R: Reporter> TallyReporter<R> {
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            passes: Vec::new(),
        }
    }

    /// Summaries of every pass seen so far, in start order.
    #[must_use]
    pub fn passes(&self) -> &[PassSummary] {
        &self.passes
    }

    pub fn into_passes(self) -> Vec<PassSummary> {
        self.passes
    }

    /// The pass in progress; outcomes always belong to the latest start.
    fn current(&mut self) -> Option<&mut PassSummary> {
        self.passes.last_mut()
    }
}

impl<R: Reporter> Reporter for TallyReporter<R> {
    fn pass_started(&mut self, repository: &Repository, blob_store: &str) {
        self.passes.push(PassSummary::new(repository, blob_store));
        self.inner.pass_started(repository, blob_store);
    }

    fn asset_passed(&mut self, asset: &Asset) {
        if let Some(pass) = self.current() {
            pass.checked += 1;
            pass.passed += 1;
        }
        self.inner.asset_passed(asset);
    }

    fn discrepancy(&mut self, asset: &Asset, discrepancy: &Discrepancy) {
        if let Some(pass) = self.current() {
            let kind = discrepancy.kind();
            pass.checked += 1;
            *pass.discrepancies.entry(kind).or_insert(0) += 1;
            pass.findings.push(Finding {
                asset_id: asset.id.clone(),
                asset: asset.to_string(),
                kind,
                message: discrepancy.to_string(),
            });
        }
        self.inner.discrepancy(asset, discrepancy);
    }

    fn cancelled(&mut self, repository: &Repository) {
        if let Some(pass) = self.current() {
            pass.cancelled = true;
        }
        self.inner.cancelled(repository);
    }

    fn catalog_failed(&mut self, repository: &Repository, error: &CatalogError) {
        if let Some(pass) = self.current() {
            pass.catalog_error = Some(error.to_string());
        }
        self.inner.catalog_failed(repository, error);
    }
}

// ---------------------------------------------------------------------------
// CollectingReporter
// ---------------------------------------------------------------------------

/// An outcome as it was handed to a reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    PassStarted {
        repository: String,
        blob_store: String,
    },
    Passed {
        asset_id: String,
    },
    Discrepancy {
        asset_id: String,
        asset: String,
        discrepancy: Discrepancy,
    },
    Cancelled {
        repository: String,
    },
    CatalogFailed {
        repository: String,
        error: String,
    },
}

/// Records every outcome in arrival order.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    pub events: Vec<ReportEvent>,
}

impl CollectingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reported discrepancies as `(asset id, discrepancy)` pairs.
    pub fn discrepancies(&self) -> impl Iterator<Item = (&str, &Discrepancy)> {
        self.events.iter().filter_map(|event| match event {
            ReportEvent::Discrepancy {
                asset_id,
                discrepancy,
                ..
            } => Some((asset_id.as_str(), discrepancy)),
            _ => None,
        })
    }

    /// Number of cancellation reports.
    #[must_use]
    pub fn cancellations(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, ReportEvent::Cancelled { .. }))
            .count()
    }

    /// Ids of assets that produced any per-asset report, in order.
    #[must_use]
    pub fn asset_ids(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Passed { asset_id } | ReportEvent::Discrepancy { asset_id, .. } => {
                    Some(asset_id.as_str())
                }
                _ => None,
            })
            .collect()
    }
}

impl Reporter for CollectingReporter {
    fn pass_started(&mut self, repository: &Repository, blob_store: &str) {
        self.events.push(ReportEvent::PassStarted {
            repository: repository.name.clone(),
            blob_store: blob_store.to_string(),
        });
    }

    fn asset_passed(&mut self, asset: &Asset) {
        self.events.push(ReportEvent::Passed {
            asset_id: asset.id.clone(),
        });
    }

    fn discrepancy(&mut self, asset: &Asset, discrepancy: &Discrepancy) {
        self.events.push(ReportEvent::Discrepancy {
            asset_id: asset.id.clone(),
            asset: asset.to_string(),
            discrepancy: discrepancy.clone(),
        });
    }

    fn cancelled(&mut self, repository: &Repository) {
        self.events.push(ReportEvent::Cancelled {
            repository: repository.name.clone(),
        });
    }

    fn catalog_failed(&mut self, repository: &Repository, error: &CatalogError) {
        self.events.push(ReportEvent::CatalogFailed {
            repository: repository.name.clone(),
            error: error.to_string(),
        });
    }
}
