use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one fan-out run.
///
/// Design:
/// - Lock-free (Atomics)
/// - Shared by the dispatcher, every fetcher and the collector
#[derive(Default, Debug)]
pub struct RunMetrics {
    pub symbols_dispatched: AtomicUsize,
    pub quotes_printed: AtomicUsize,
    pub fetch_failures: AtomicUsize,
}

impl RunMetrics {
    pub fn snapshot(&self) -> RunSummary {
        RunSummary {
            dispatched: self.symbols_dispatched.load(Ordering::Relaxed),
            printed: self.quotes_printed.load(Ordering::Relaxed),
            failed: self.fetch_failures.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of `RunMetrics` taken once the run is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub dispatched: usize,
    pub printed: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Every dispatched symbol ended up either printed or failed.
    pub fn is_balanced(&self) -> bool {
        self.printed + self.failed == self.dispatched
    }
}
