//! Cached task collection, synchronized from server responses.

use punchcard_proto::task::{Task, TaskId};

use super::registry::TickerRegistry;

/// The client's cached copy of the server's task collection, plus the
/// display-ticker registry derived from it.
///
/// Records are only ever replaced from successful server responses; the
/// one client-side mutation is the cosmetic once-per-second increment in
/// [`tick`](Self::tick). Every mutation ends by reconciling the registry
/// against the updated collection.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    tickers: TickerRegistry,
}

impl TaskList {
    /// Creates an empty task list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached records, in server order (new tasks append at the end).
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The display-ticker registry.
    #[must_use]
    pub const fn tickers(&self) -> &TickerRegistry {
        &self.tickers
    }

    /// Number of cached tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a cached record by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replaces the collection wholesale with a fresh server snapshot.
    ///
    /// Tickers for tasks now reported as not running (or gone entirely)
    /// are dropped; still-running tasks keep their ticker untouched.
    pub fn apply_fetch(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.tickers.reconcile(&self.tasks);
    }

    /// Appends a newly created record to the end of the collection.
    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
        self.tickers.reconcile(&self.tasks);
    }

    /// Applies a toggle response.
    ///
    /// The server enforces single-running-task semantics, so every *other*
    /// cached record still marked running is stopped locally right away
    /// rather than waiting for the next fetch. The toggled task's ticker is
    /// then aligned with its server-reported run state.
    pub fn apply_toggled(&mut self, task: Task) {
        let id = task.id;
        for other in &mut self.tasks {
            if other.id != id && other.is_running {
                other.is_running = false;
            }
        }
        self.replace(task);
        self.tickers.reconcile(&self.tasks);
    }

    /// Applies a completion response: the record is replaced and its
    /// ticker dropped.
    pub fn apply_completed(&mut self, task: Task) {
        self.replace(task);
        self.tickers.reconcile(&self.tasks);
    }

    /// Removes a deleted task and its ticker.
    pub fn remove(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
        self.tickers.reconcile(&self.tasks);
    }

    /// Advances every ticking task's displayed elapsed time by one second.
    ///
    /// Purely cosmetic: the next server record for a task overwrites the
    /// local increment.
    pub fn tick(&mut self) {
        for task in &mut self.tasks {
            if self.tickers.is_ticking(task.id) {
                task.time_elapsed = task.time_elapsed.saturating_add(1);
            }
        }
    }

    /// Drops the collection and every ticker (logout, teardown).
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.tickers.clear();
    }

    /// Replaces the cached record with the same id as `task`.
    ///
    /// A response for an id the client no longer caches is dropped; the
    /// collection only grows through fetch and create responses.
    fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        } else {
            tracing::warn!(task_id = %task.id, "response for unknown task dropped");
        }
    }
}
