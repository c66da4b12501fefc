//! Async bridge between the TUI event loop and the tracker REST API.
//!
//! The poll-based TUI loop cannot await network calls, so all HTTP I/O
//! runs on background tokio tasks and the two sides talk over channels:
//!
//! ```text
//! TUI (main thread)  ←── ApiEvent ───  tokio background tasks
//!                     ─── ApiCommand →
//! ```
//!
//! Each request command is served on its own task over a shared client,
//! so events arrive in completion order, not issuance order. The cached
//! task collection therefore reflects whichever response landed last for
//! a given task; the next fetch reconciles any divergence.

pub mod client;

use std::sync::Arc;

use tokio::sync::mpsc;

use punchcard_proto::task::{Task, TaskId};

pub use client::{ApiClient, ApiError, Outcome, classify};

use crate::config::ClientConfig;

/// Commands sent from the TUI main loop to the API background tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    /// Authenticate with the backend.
    Login {
        /// Account name.
        username: String,
        /// Password.
        password: String,
    },
    /// Create an account. Does not authenticate.
    Register {
        /// Desired account name.
        username: String,
        /// Contact email.
        email: String,
        /// Password.
        password: String,
    },
    /// Tear down the server-held session.
    Logout,
    /// Retrieve the full task collection.
    FetchTasks,
    /// Create a task with the given name.
    AddTask {
        /// Display name, already validated non-empty by the caller.
        name: String,
    },
    /// Start or pause the task's timer.
    ToggleTask {
        /// Target task.
        id: TaskId,
    },
    /// Finalize the task.
    CompleteTask {
        /// Target task.
        id: TaskId,
    },
    /// Delete a completed task.
    DeleteTask {
        /// Target task.
        id: TaskId,
    },
    /// Stop the dispatcher. No further commands are served.
    Shutdown,
}

/// Events sent from the API background tasks to the TUI main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    /// Login succeeded; the session cookie is now held by the client.
    LoginSucceeded {
        /// Display name returned by the server.
        username: String,
    },
    /// Login was refused.
    LoginFailed {
        /// User-presentable reason.
        message: String,
    },
    /// Registration succeeded; the user can now log in.
    RegisterSucceeded,
    /// Registration was refused.
    RegisterFailed {
        /// User-presentable reason.
        message: String,
    },
    /// Logout completed server-side.
    LoggedOut,
    /// A task call came back unauthorized; the session is gone.
    SessionExpired,
    /// Fresh authoritative task collection.
    TasksFetched {
        /// Records in server order.
        tasks: Vec<Task>,
    },
    /// A task was created.
    TaskAdded {
        /// The server-assigned record.
        task: Task,
    },
    /// A toggle completed.
    TaskToggled {
        /// The updated record.
        task: Task,
    },
    /// A completion completed.
    TaskCompleted {
        /// The updated record.
        task: Task,
    },
    /// A deletion completed.
    TaskDeleted {
        /// Id of the removed task.
        id: TaskId,
    },
    /// A request failed for a reason other than session expiry.
    RequestFailed {
        /// Which operation failed.
        context: &'static str,
        /// Error description for the status line and the log.
        message: String,
    },
}

/// Spawns the API dispatcher and returns the channel handles.
///
/// # Errors
///
/// Returns [`ApiError`] if the HTTP client cannot be built (bad base URL).
pub fn spawn_api(
    config: &ClientConfig,
) -> Result<(mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>), ApiError> {
    let client = Arc::new(ApiClient::new(&config.base_url, config.request_timeout)?);
    let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>(config.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<ApiEvent>(config.channel_capacity);

    tokio::spawn(dispatch_loop(client, cmd_rx, evt_tx));

    Ok((cmd_tx, evt_rx))
}

/// Background task: serve commands until shutdown.
///
/// Each request is spawned onto its own task so a slow mutation never
/// blocks a fetch; the UI stays responsive while calls are in flight.
async fn dispatch_loop(
    client: Arc<ApiClient>,
    mut cmd_rx: mpsc::Receiver<ApiCommand>,
    evt_tx: mpsc::Sender<ApiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == ApiCommand::Shutdown {
            tracing::info!("api dispatcher shutting down");
            break;
        }
        let client = Arc::clone(&client);
        let evt_tx = evt_tx.clone();
        tokio::spawn(async move {
            if let Some(event) = execute(&client, cmd).await {
                // A send error means the TUI dropped; nothing left to notify.
                let _ = evt_tx.send(event).await;
            }
        });
    }
}

/// Runs one command against the API and maps the result to an event.
async fn execute(client: &ApiClient, cmd: ApiCommand) -> Option<ApiEvent> {
    let event = match cmd {
        ApiCommand::Login { username, password } => {
            match client.login(&username, &password).await {
                Ok(resp) => ApiEvent::LoginSucceeded {
                    username: resp.username,
                },
                Err(e) => ApiEvent::LoginFailed {
                    message: e.to_string(),
                },
            }
        }
        ApiCommand::Register {
            username,
            email,
            password,
        } => match client.register(&username, &email, &password).await {
            Ok(()) => ApiEvent::RegisterSucceeded,
            Err(e) => ApiEvent::RegisterFailed {
                message: e.to_string(),
            },
        },
        ApiCommand::Logout => match client.logout().await {
            Ok(()) => ApiEvent::LoggedOut,
            // A dead session is as logged-out as it gets.
            Err(ApiError::AuthExpired) => ApiEvent::LoggedOut,
            Err(e) => failure_event("logout", &e),
        },
        ApiCommand::FetchTasks => match client.fetch_tasks().await {
            Ok(tasks) => ApiEvent::TasksFetched { tasks },
            Err(e) => failure_event("fetch tasks", &e),
        },
        ApiCommand::AddTask { name } => match client.create_task(&name).await {
            Ok(task) => ApiEvent::TaskAdded { task },
            Err(e) => failure_event("add task", &e),
        },
        ApiCommand::ToggleTask { id } => match client.toggle_task(id).await {
            Ok(task) => ApiEvent::TaskToggled { task },
            Err(e) => failure_event("toggle task", &e),
        },
        ApiCommand::CompleteTask { id } => match client.complete_task(id).await {
            Ok(task) => ApiEvent::TaskCompleted { task },
            Err(e) => failure_event("complete task", &e),
        },
        ApiCommand::DeleteTask { id } => match client.delete_task(id).await {
            Ok(()) => ApiEvent::TaskDeleted { id },
            Err(e) => failure_event("delete task", &e),
        },
        ApiCommand::Shutdown => return None,
    };
    Some(event)
}

/// Maps a task-call error to its event: 401/403 means the session is gone
/// everywhere; anything else is reported and leaves prior state unchanged.
fn failure_event(context: &'static str, err: &ApiError) -> ApiEvent {
    if matches!(err, ApiError::AuthExpired) {
        tracing::info!(context, "session expired");
        return ApiEvent::SessionExpired;
    }
    tracing::warn!(context, error = %err, "api request failed");
    ApiEvent::RequestFailed {
        context,
        message: err.to_string(),
    }
}
