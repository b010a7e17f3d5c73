use anyhow::Context;
use serde::Serialize;
use strata_catalog::{CatalogError, CatalogReader};
use strata_config::StrataConfig;
use strata_core::{Asset, Repository};
use strata_integrity::{
    CancellationToken, Discrepancy, IntegrityCheckTask, PassSummary, Reporter, TaskSummary,
    TracingReporter,
};

use crate::cli::{CheckArgs, GlobalFlags};
use crate::commands::shared::{open_blob_store, open_catalog};
use crate::output::output;
use crate::progress::Progress;

/// What `strata check` prints.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum CheckReport {
    Repository(PassSummary),
    BlobStore(TaskSummary),
}

/// Handle `strata check`.
///
/// The pass runs on a blocking thread; Ctrl-C flips the cancellation token
/// and the pass stops before its next asset. Discrepancies do not change the
/// exit code.
pub async fn handle(
    args: CheckArgs,
    config: StrataConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let token = CancellationToken::new();
    let interrupt = tokio::spawn(cancel_on_interrupt(token.clone()));

    let quiet = flags.quiet;
    let report = tokio::task::spawn_blocking(move || run(&args, &config, &token, quiet))
        .await
        .context("integrity check worker failed")?;
    interrupt.abort();

    output(&report?, flags.format)
}

async fn cancel_on_interrupt(token: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::warn!("interrupt received; stopping after the current asset");
            token.cancel();
        }
        Err(error) => tracing::warn!(%error, "unable to listen for interrupts"),
    }
}

fn run(
    args: &CheckArgs,
    config: &StrataConfig,
    token: &CancellationToken,
    quiet: bool,
) -> anyhow::Result<CheckReport> {
    let catalog = open_catalog(config)?;
    let task = IntegrityCheckTask::default();
    let progress = Progress::spinner("checking assets", quiet);
    let mut reporter = ProgressReporter {
        inner: TracingReporter::new(config.integrity.severity),
        progress: &progress,
    };

    let report = if let Some(name) = &args.repository {
        let repository = catalog
            .find_repository(name)
            .context("failed to look up repository")?
            .ok_or_else(|| CatalogError::RepositoryNotFound(name.clone()))?;
        let store = open_blob_store(config, &repository.blob_store);
        task.check_repository(&repository, &catalog, &store, token, &mut reporter)
            .map(CheckReport::Repository)
    } else {
        let name = args
            .blob_store
            .as_deref()
            .unwrap_or(&config.blob_store.name);
        let store = open_blob_store(config, name);
        task.run(&catalog, &store, token, &mut reporter)
            .map(CheckReport::BlobStore)
    };
    progress.finish_and_clear();

    let report = report.context("integrity check failed")?;
    log_totals(&report);
    Ok(report)
}

fn log_totals(report: &CheckReport) {
    let (passes, discrepancies, cancelled) = match report {
        CheckReport::Repository(pass) => (1, pass.discrepancy_count(), pass.cancelled),
        CheckReport::BlobStore(task) => (
            task.passes.len(),
            task.discrepancy_count(),
            task.was_cancelled(),
        ),
    };
    tracing::info!(passes, discrepancies, cancelled, "integrity check finished");
}

/// Ticks the spinner once per asset outcome, then forwards.
struct ProgressReporter<'a, R> {
    inner: R,
    progress: &'a Progress,
}

impl<R: Reporter> Reporter for ProgressReporter<'_, R> {
    fn pass_started(&mut self, repository: &Repository, blob_store: &str) {
        self.progress
            .set_message(&format!("checking {} in {blob_store}", repository.name));
        self.inner.pass_started(repository, blob_store);
    }

    fn asset_passed(&mut self, asset: &Asset) {
        self.progress.inc(1);
        self.inner.asset_passed(asset);
    }

    fn discrepancy(&mut self, asset: &Asset, discrepancy: &Discrepancy) {
        self.progress.inc(1);
        self.inner.discrepancy(asset, discrepancy);
    }

    fn cancelled(&mut self, repository: &Repository) {
        self.inner.cancelled(repository);
    }

    fn catalog_failed(&mut self, repository: &Repository, error: &CatalogError) {
        self.inner.catalog_failed(repository, error);
    }
}
