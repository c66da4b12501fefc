//! Task records as exchanged with the tracker backend.
//!
//! The server owns every field: the client only caches records it received
//! and replaces them wholesale from responses. Field names on the wire are
//! camelCase (`isRunning`, `isCompleted`, `timeElapsed`).

use serde::{Deserialize, Serialize};

/// Unique identifier for a task, assigned by the server.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw server-assigned identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-observed projection of a task's server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    /// Not running, not completed. Can be started or completed.
    Stopped,
    /// Timer active on the server. Can be paused or completed.
    Running,
    /// Finalized. Can only be deleted.
    Completed,
}

impl std::fmt::Display for TaskPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A tracked task as reported by the server.
///
/// `time_elapsed` is authoritative on the server; the client holds a
/// locally-incremented shadow copy while the task is running, for display
/// smoothness only, and discards it whenever a fresh record arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Display name, set at creation, immutable thereafter.
    pub name: String,
    /// True while the task's timer is active on the server.
    pub is_running: bool,
    /// True once finalized; completed tasks can only be deleted.
    pub is_completed: bool,
    /// Accumulated whole seconds.
    pub time_elapsed: u64,
}

impl Task {
    /// Derives the task's phase from the server flags.
    ///
    /// A record carrying both flags is malformed (the server never emits
    /// one); `Completed` wins so the UI can never show a running completed
    /// task.
    #[must_use]
    pub const fn phase(&self) -> TaskPhase {
        if self.is_completed {
            TaskPhase::Completed
        } else if self.is_running {
            TaskPhase::Running
        } else {
            TaskPhase::Stopped
        }
    }

    /// Whether start/pause may be offered for this task.
    #[must_use]
    pub const fn can_toggle(&self) -> bool {
        !self.is_completed
    }

    /// Whether completion may be offered for this task.
    #[must_use]
    pub const fn can_complete(&self) -> bool {
        !self.is_completed
    }

    /// Whether deletion may be offered for this task.
    #[must_use]
    pub const fn can_delete(&self) -> bool {
        self.is_completed
    }
}

/// Request body for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Display name for the new task.
    pub name: String,
}
