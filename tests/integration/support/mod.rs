//! In-process stub of the tracker backend for integration tests.
//!
//! Test tooling only: implements the eight endpoints over an in-memory
//! store with a session cookie, just enough to exercise the client. The
//! real backend stays out of scope.

#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};

use punchcard_proto::auth::{ErrorBody, LoginRequest, LoginResponse, RegisterRequest};
use punchcard_proto::task::{NewTask, Task, TaskId};

const SESSION_COOKIE: &str = "sessionid";

#[derive(Default)]
struct StubState {
    /// username -> password
    users: HashMap<String, String>,
    /// session token -> username
    sessions: HashMap<String, String>,
    tasks: Vec<Task>,
    next_id: i64,
    next_session: u64,
}

type Shared = Arc<Mutex<StubState>>;

/// Handle to a running stub backend.
pub struct StubServer {
    addr: SocketAddr,
    state: Shared,
}

impl StubServer {
    /// Binds an ephemeral port and serves the tracker API under `/tracker`.
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(StubState {
            next_id: 1,
            ..StubState::default()
        }));

        let router = Router::new()
            .route("/tracker/auth/login/", post(login))
            .route("/tracker/auth/register/", post(register))
            .route("/tracker/auth/logout/", post(logout))
            .route("/tracker/tasks/", get(list_tasks).post(create_task))
            .route("/tracker/tasks/{id}/toggle/", post(toggle_task))
            .route("/tracker/tasks/{id}/complete/", post(complete_task))
            .route("/tracker/tasks/{id}/delete/", delete(delete_task))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    /// Like [`spawn`](Self::spawn), with one account pre-registered.
    pub async fn spawn_with_user(username: &str, password: &str) -> Self {
        let server = Self::spawn().await;
        server
            .state
            .lock()
            .unwrap()
            .users
            .insert(username.to_string(), password.to_string());
        server
    }

    /// Base URL to hand to the client under test.
    pub fn base_url(&self) -> String {
        format!("http://{}/tracker", self.addr)
    }

    /// Invalidates every session, as an expired backend session would.
    pub fn expire_sessions(&self) {
        self.state.lock().unwrap().sessions.clear();
    }

    /// Server-side view of the task store.
    pub fn tasks_snapshot(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    /// Overwrites a task's accumulated seconds, standing in for the
    /// backend's own timer accounting.
    pub fn set_elapsed(&self, id: TaskId, secs: u64) {
        let mut state = self.state.lock().unwrap();
        if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
            task.time_elapsed = secs;
        }
    }
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.strip_prefix(SESSION_COOKIE))
        .find_map(|rest| rest.strip_prefix('='))
}

fn session_user(state: &StubState, headers: &HeaderMap) -> Option<String> {
    let token = cookie_token(headers)?;
    state.sessions.get(token).cloned()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: Some(message.to_string()),
        }),
    )
        .into_response()
}

fn forbidden() -> Response {
    error_response(StatusCode::FORBIDDEN, "Authentication required")
}

async fn login(State(state): State<Shared>, Json(req): Json<LoginRequest>) -> Response {
    let mut state = state.lock().unwrap();
    let valid = state
        .users
        .get(&req.username)
        .is_some_and(|p| *p == req.password);
    if !valid {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    state.next_session += 1;
    let token = format!("tok-{}", state.next_session);
    state.sessions.insert(token.clone(), req.username.clone());
    (
        StatusCode::OK,
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}={token}; Path=/"),
        )],
        Json(LoginResponse {
            username: req.username,
        }),
    )
        .into_response()
}

async fn register(State(state): State<Shared>, Json(req): Json<RegisterRequest>) -> Response {
    let mut state = state.lock().unwrap();
    if state.users.contains_key(&req.username) {
        return error_response(StatusCode::BAD_REQUEST, "User already exists");
    }
    state.users.insert(req.username, req.password);
    StatusCode::CREATED.into_response()
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(token) = cookie_token(&headers) {
        let token = token.to_string();
        state.sessions.remove(&token);
    }
    StatusCode::OK.into_response()
}

async fn list_tasks(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if session_user(&state, &headers).is_none() {
        return forbidden();
    }
    Json(state.tasks.clone()).into_response()
}

async fn create_task(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<NewTask>,
) -> Response {
    let mut state = state.lock().unwrap();
    if session_user(&state, &headers).is_none() {
        return forbidden();
    }
    let id = state.next_id;
    state.next_id += 1;
    let task = Task {
        id: TaskId::new(id),
        name: req.name,
        is_running: false,
        is_completed: false,
        time_elapsed: 0,
    };
    state.tasks.push(task.clone());
    Json(task).into_response()
}

async fn toggle_task(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if session_user(&state, &headers).is_none() {
        return forbidden();
    }
    let id = TaskId::new(id);
    let Some(index) = state.tasks.iter().position(|t| t.id == id) else {
        return error_response(StatusCode::NOT_FOUND, "Task not found");
    };
    if state.tasks[index].is_completed {
        return error_response(StatusCode::BAD_REQUEST, "Task is already completed");
    }
    let now_running = !state.tasks[index].is_running;
    if now_running {
        // At most one task runs at a time.
        for task in &mut state.tasks {
            task.is_running = false;
        }
    }
    state.tasks[index].is_running = now_running;
    Json(state.tasks[index].clone()).into_response()
}

async fn complete_task(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if session_user(&state, &headers).is_none() {
        return forbidden();
    }
    let id = TaskId::new(id);
    let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) else {
        return error_response(StatusCode::NOT_FOUND, "Task not found");
    };
    task.is_running = false;
    task.is_completed = true;
    Json(task.clone()).into_response()
}

async fn delete_task(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if session_user(&state, &headers).is_none() {
        return forbidden();
    }
    let id = TaskId::new(id);
    state.tasks.retain(|t| t.id != id);
    StatusCode::OK.into_response()
}
