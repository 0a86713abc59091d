use std::pin::pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::warn;
use tokio::sync::Notify;

/// Counter of outstanding work units with an async wait.
///
/// - `add` is called by the dispatcher before each unit is launched
/// - `done` may be called concurrently from any task
/// - `wait` resolves once the counter is back at zero
///
/// A unit that is added and never marked done keeps `wait`
/// pending forever. Every path that consumes a unit must call
/// `done` exactly once.
#[derive(Debug, Default)]
pub struct Completion {
    outstanding: AtomicUsize,
    zero: Notify,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, units: usize) {
        self.outstanding.fetch_add(units, Ordering::SeqCst);
    }

    /// Marks one unit as finished. Extra calls are ignored.
    pub fn done(&self) {
        match self
            .outstanding
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        {
            Ok(1) => self.zero.notify_waiters(),
            Ok(_) => {}
            Err(_) => warn!("completion signalled with no outstanding units"),
        }
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Waits until every added unit has been marked done.
    pub async fn wait(&self) {
        loop {
            // Register before checking, otherwise a `done` between
            // the load and the await would be missed.
            let mut notified = pin!(self.zero.notified());
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }
}
