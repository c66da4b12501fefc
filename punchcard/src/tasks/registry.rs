//! Display-ticker registry for running tasks.
//!
//! The registry tracks which task ids currently have an active display
//! ticker. It owns no timers: the main loop is the single one-second tick
//! source and asks the registry which cached records the tick applies to.

use std::collections::BTreeSet;

use punchcard_proto::task::{Task, TaskId, TaskPhase};

/// Set of task ids with an active display ticker.
///
/// At most one entry exists per task. Every code path that transitions a
/// task out of the running state, or removes it from the cached
/// collection, must also remove its entry here; [`reconcile`](Self::reconcile)
/// re-derives membership from an authoritative snapshot to heal any missed
/// cleanup.
#[derive(Debug, Default)]
pub struct TickerRegistry {
    ticking: BTreeSet<TaskId>,
}

impl TickerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a display ticker is active for `id`.
    #[must_use]
    pub fn is_ticking(&self, id: TaskId) -> bool {
        self.ticking.contains(&id)
    }

    /// Starts a ticker for `id`.
    ///
    /// Returns `false` if one was already active (the existing ticker is
    /// left untouched).
    pub fn start(&mut self, id: TaskId) -> bool {
        self.ticking.insert(id)
    }

    /// Stops the ticker for `id`. Returns `false` if none was active.
    pub fn stop(&mut self, id: TaskId) -> bool {
        self.ticking.remove(&id)
    }

    /// Stops every ticker (logout, teardown).
    pub fn clear(&mut self) {
        self.ticking.clear();
    }

    /// Number of active tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticking.len()
    }

    /// Whether no ticker is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticking.is_empty()
    }

    /// Iterates over ids with an active ticker, in id order.
    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.ticking.iter().copied()
    }

    /// Re-derives registry membership from an authoritative task snapshot.
    ///
    /// Entries whose task is missing from `tasks`, or no longer in the
    /// running phase, are removed; running tasks gain an entry if they lack
    /// one. Tasks that were already ticking and are still running keep
    /// their entry untouched.
    pub fn reconcile(&mut self, tasks: &[Task]) {
        let running: BTreeSet<TaskId> = tasks
            .iter()
            .filter(|t| t.phase() == TaskPhase::Running)
            .map(|t| t.id)
            .collect();

        for stale in self.ticking.difference(&running) {
            tracing::debug!(task_id = %stale, "removing stale display ticker");
        }

        self.ticking = running;
    }
}
