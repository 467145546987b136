//! Run bookkeeping: log entries, progress and observer notification.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::traits::observer::RunObserver;
use crate::types::run::{ExtractionResult, RunState};

/// Owns the [`RunState`] of one run and notifies observers on every change.
///
/// Log entries are mirrored to `tracing`: normal steps at debug level,
/// recovered and fatal failures at warn and error.
pub struct RunTracker<'a> {
    state: RunState,
    observers: &'a [Arc<dyn RunObserver>],
}

impl<'a> RunTracker<'a> {
    pub fn new(observers: &'a [Arc<dyn RunObserver>]) -> Self {
        Self {
            state: RunState::new(),
            observers,
        }
    }

    /// A tracker nobody listens to.
    pub fn detached() -> RunTracker<'static> {
        RunTracker {
            state: RunState::new(),
            observers: &[],
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn into_state(self) -> RunState {
        self.state
    }

    /// Record a normal step.
    pub fn log(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!(step = %entry, "run");
        self.push(entry);
    }

    /// Record a recovered failure.
    pub fn warn(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        warn!(step = %entry, "run");
        self.push(entry);
    }

    /// Record a failure that ends the run.
    pub fn fatal(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        error!(step = %entry, "run");
        self.push(entry);
    }

    /// Move to page `index` of `scan_count` and log it.
    pub fn begin_page(&mut self, index: usize, url: &str, scan_count: usize) {
        self.state.begin_page(index, url, scan_count);
        self.log(format!("Scraping page {}/{}: {}", index + 1, scan_count, url));
    }

    /// Terminate the run. A second call is ignored.
    pub fn finish(&mut self, result: ExtractionResult) {
        if self.state.is_finished() {
            return;
        }
        self.state.finish(result);
        self.notify();
    }

    fn push(&mut self, entry: String) {
        self.state.push_log(entry);
        self.notify();
    }

    fn notify(&self) {
        for observer in self.observers {
            observer.on_update(&self.state);
        }
    }
}
