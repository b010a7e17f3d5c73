//! Cooperative cancellation.

pub use tokio_util::sync::CancellationToken;

/// Polled between assets; once it answers `true` the running pass stops.
pub trait CancellationProbe {
    fn is_cancelled(&self) -> bool;
}

impl<F> CancellationProbe for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Clones share one state, so a signal handler can hold a clone while the
/// checker polls another.
impl CancellationProbe for CancellationToken {
    fn is_cancelled(&self) -> bool {
        Self::is_cancelled(self)
    }
}
