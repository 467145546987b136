//! Run progress observers.

use crate::types::run::RunState;

/// Receives a snapshot of the run state after every change.
///
/// Called synchronously from the pipeline, so implementations should return
/// quickly.
pub trait RunObserver: Send + Sync {
    fn on_update(&self, state: &RunState);
}

impl<F> RunObserver for F
where
    F: Fn(&RunState) + Send + Sync,
{
    fn on_update(&self, state: &RunState) {
        self(state)
    }
}
