//! # strata-integrity
//!
//! Audits a repository's catalog against the blob store holding its content.
//!
//! For every asset in a repository the checker resolves the asset's content
//! reference, fetches the blob store's attributes for it, and compares the
//! logical name and the capture-time digest. Each asset produces at most one
//! outcome, delivered to a [`Reporter`]; nothing is repaired and nothing is
//! written.
//!
//! - [`check_asset`] / [`evaluate`]: the per-asset decision
//! - [`IntegrityCheckStrategy`]: a pass over one repository
//! - [`StrategyRegistry`]: strategy per repository format
//! - [`IntegrityCheckTask`]: every repository of one blob store
//! - [`CancellationProbe`] / [`CancellationToken`]: cooperative stop

pub mod cancel;
pub mod check;
pub mod discrepancy;
pub mod report;
pub mod strategy;
pub mod task;

pub use cancel::{CancellationProbe, CancellationToken};
pub use check::{CheckOutcome, check_asset, evaluate};
pub use discrepancy::{Discrepancy, DiscrepancyKind};
pub use report::{
    CollectingReporter, Finding, PassSummary, ReportEvent, Reporter, TallyReporter,
    TracingReporter, severity_for,
};
pub use strategy::{DefaultIntegrityCheckStrategy, IntegrityCheckStrategy, StrategyRegistry};
pub use task::{IntegrityCheckTask, TaskSummary};
