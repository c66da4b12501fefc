//! Application state and event handling.
//!
//! `App` owns everything the UI renders: the session mirror, the cached
//! task list, and form/focus state. Key events map to at most one
//! [`ApiCommand`]; [`ApiEvent`]s are the only way server state enters the
//! app. All of it is mutated on the main loop only.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use punchcard_proto::task::Task;

use crate::api::{ApiCommand, ApiEvent};
use crate::session::Session;
use crate::tasks::TaskList;

/// Interval between display-timer increments.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Which auth form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Username + password.
    Login,
    /// Username + email + password.
    Register,
}

/// Which auth form field is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    /// Account name field.
    Username,
    /// Email field (register form only).
    Email,
    /// Password field.
    Password,
}

/// Which tracker panel is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerFocus {
    /// The new-task name input (default).
    Input,
    /// The task list.
    TaskList,
}

/// Main application state.
pub struct App {
    /// Session mirror, gating the tracker screen.
    pub session: Session,
    /// Cached task collection + ticker registry.
    pub tasks: TaskList,
    /// Which auth form is showing.
    pub auth_mode: AuthMode,
    /// Focused auth form field.
    pub auth_field: AuthField,
    /// Auth form: account name.
    pub username_input: String,
    /// Auth form: email (register only).
    pub email_input: String,
    /// Auth form: password.
    pub password_input: String,
    /// Focused tracker panel.
    pub focus: TrackerFocus,
    /// New-task name input.
    pub name_input: String,
    /// Cursor position in `name_input` (character index).
    pub cursor_position: usize,
    /// Selected row in the task list.
    pub selected_task: usize,
    /// Transient status-line message (request failures, channel pressure).
    pub status_message: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    last_tick: Instant,
}

impl App {
    /// Creates a fresh, unauthenticated application.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            tasks: TaskList::new(),
            auth_mode: AuthMode::Login,
            auth_field: AuthField::Username,
            username_input: String::new(),
            email_input: String::new(),
            password_input: String::new(),
            focus: TrackerFocus::Input,
            name_input: String::new(),
            cursor_position: 0,
            selected_task: 0,
            status_message: None,
            should_quit: false,
            last_tick: Instant::now(),
        }
    }

    /// Handle a key event. Returns a command when the action needs the
    /// network; every command-producing path is gated on the tracker
    /// screen (and therefore on an authenticated session), except the
    /// auth form's own submissions.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        // Global shortcuts.
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return None;
            }
            _ => {}
        }

        if self.session.is_authenticated() {
            match self.focus {
                TrackerFocus::Input => self.handle_name_input_key(key),
                TrackerFocus::TaskList => self.handle_task_list_key(key),
            }
        } else {
            self.handle_auth_key(key)
        }
    }

    /// Applies a server event. Returns a follow-up command when one is
    /// called for (the post-login fetch).
    pub fn apply_api_event(&mut self, event: ApiEvent) -> Option<ApiCommand> {
        match event {
            ApiEvent::LoginSucceeded { username } => {
                self.session.establish(username);
                self.username_input.clear();
                self.email_input.clear();
                self.password_input.clear();
                self.focus = TrackerFocus::Input;
                self.selected_task = 0;
                return Some(ApiCommand::FetchTasks);
            }
            ApiEvent::LoginFailed { message } | ApiEvent::RegisterFailed { message } => {
                self.session.set_error(message);
            }
            ApiEvent::RegisterSucceeded => {
                self.auth_mode = AuthMode::Login;
                self.auth_field = AuthField::Username;
                self.username_input.clear();
                self.email_input.clear();
                self.password_input.clear();
                self.session
                    .set_info("Registration successful! You can now log in.");
            }
            ApiEvent::LoggedOut => {
                self.session.clear("You have been logged out.");
                self.tasks.clear();
                self.reset_forms();
            }
            ApiEvent::SessionExpired => {
                // Only meaningful while the client believes it is logged in.
                if self.session.is_authenticated() {
                    self.session.expire();
                    self.tasks.clear();
                    self.reset_forms();
                }
            }
            ApiEvent::TasksFetched { tasks } => {
                if self.session.is_authenticated() {
                    self.tasks.apply_fetch(tasks);
                    self.clamp_selection();
                } else {
                    tracing::debug!("dropping task snapshot received while logged out");
                }
            }
            ApiEvent::TaskAdded { task } => {
                self.tasks.append(task);
                self.name_input.clear();
                self.cursor_position = 0;
            }
            ApiEvent::TaskToggled { task } => {
                self.tasks.apply_toggled(task);
            }
            ApiEvent::TaskCompleted { task } => {
                self.tasks.apply_completed(task);
            }
            ApiEvent::TaskDeleted { id } => {
                self.tasks.remove(id);
                self.clamp_selection();
            }
            ApiEvent::RequestFailed { context, message } => {
                self.status_message = Some(format!("{context} failed: {message}"));
            }
        }
        None
    }

    /// Advances display timers by however many whole seconds have elapsed
    /// since the last call. The main loop calls this every iteration; the
    /// per-second cadence lives here, not in the caller.
    pub fn tick(&mut self) {
        let now = Instant::now();
        while now.duration_since(self.last_tick) >= TICK_INTERVAL {
            self.last_tick += TICK_INTERVAL;
            self.tasks.tick();
        }
    }

    /// Shows a transient status-line message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// The task under the list cursor, if any.
    #[must_use]
    pub fn selected_task_record(&self) -> Option<&Task> {
        self.tasks.tasks().get(self.selected_task)
    }

    // -- auth screen ----------------------------------------------------

    fn handle_auth_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                self.toggle_auth_mode();
                None
            }
            (KeyCode::Tab | KeyCode::Down, _) => {
                self.auth_field = self.next_auth_field();
                None
            }
            (KeyCode::BackTab | KeyCode::Up, _) => {
                self.auth_field = self.prev_auth_field();
                None
            }
            (KeyCode::Enter, _) => self.submit_auth_form(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.focused_auth_input().push(c);
                None
            }
            (KeyCode::Backspace, _) => {
                self.focused_auth_input().pop();
                None
            }
            _ => None,
        }
    }

    /// Switches between the login and register forms, resetting the
    /// notice and field focus.
    fn toggle_auth_mode(&mut self) {
        self.auth_mode = match self.auth_mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.auth_field = AuthField::Username;
        self.session.clear_notice();
    }

    /// Submits the active auth form. Empty fields suppress the request
    /// entirely; no message is shown.
    fn submit_auth_form(&mut self) -> Option<ApiCommand> {
        match self.auth_mode {
            AuthMode::Login => {
                if self.username_input.is_empty() || self.password_input.is_empty() {
                    return None;
                }
                Some(ApiCommand::Login {
                    username: self.username_input.clone(),
                    password: self.password_input.clone(),
                })
            }
            AuthMode::Register => {
                if self.username_input.is_empty()
                    || self.email_input.is_empty()
                    || self.password_input.is_empty()
                {
                    return None;
                }
                Some(ApiCommand::Register {
                    username: self.username_input.clone(),
                    email: self.email_input.clone(),
                    password: self.password_input.clone(),
                })
            }
        }
    }

    const fn next_auth_field(&self) -> AuthField {
        match (self.auth_mode, self.auth_field) {
            (AuthMode::Login, AuthField::Username) => AuthField::Password,
            (AuthMode::Login, _) => AuthField::Username,
            (AuthMode::Register, AuthField::Username) => AuthField::Email,
            (AuthMode::Register, AuthField::Email) => AuthField::Password,
            (AuthMode::Register, AuthField::Password) => AuthField::Username,
        }
    }

    const fn prev_auth_field(&self) -> AuthField {
        match (self.auth_mode, self.auth_field) {
            (AuthMode::Login, AuthField::Username) => AuthField::Password,
            (AuthMode::Login, _) => AuthField::Username,
            (AuthMode::Register, AuthField::Username) => AuthField::Password,
            (AuthMode::Register, AuthField::Email) => AuthField::Username,
            (AuthMode::Register, AuthField::Password) => AuthField::Email,
        }
    }

    fn focused_auth_input(&mut self) -> &mut String {
        match self.auth_field {
            AuthField::Username => &mut self.username_input,
            AuthField::Email => &mut self.email_input,
            AuthField::Password => &mut self.password_input,
        }
    }

    fn reset_forms(&mut self) {
        self.auth_mode = AuthMode::Login;
        self.auth_field = AuthField::Username;
        self.username_input.clear();
        self.email_input.clear();
        self.password_input.clear();
        self.name_input.clear();
        self.cursor_position = 0;
        self.focus = TrackerFocus::Input;
        self.selected_task = 0;
        self.status_message = None;
    }

    // -- tracker screen: name input -------------------------------------

    fn handle_name_input_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(ApiCommand::Logout),
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.focus = TrackerFocus::TaskList;
                None
            }
            (KeyCode::Enter, _) => self.submit_new_task(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.enter_char(c);
                None
            }
            (KeyCode::Backspace, _) => {
                self.delete_char();
                None
            }
            (KeyCode::Left, _) => {
                self.move_cursor_left();
                None
            }
            (KeyCode::Right, _) => {
                self.move_cursor_right();
                None
            }
            (KeyCode::Home, _) => {
                self.cursor_position = 0;
                None
            }
            (KeyCode::End, _) => {
                self.cursor_position = self.name_input.chars().count();
                None
            }
            _ => None,
        }
    }

    /// Submits the new-task form. A name that trims to nothing issues no
    /// command and leaves the collection untouched. The input is cleared
    /// when the creation response arrives, not at submit time.
    fn submit_new_task(&self) -> Option<ApiCommand> {
        if self.name_input.trim().is_empty() {
            return None;
        }
        Some(ApiCommand::AddTask {
            name: self.name_input.clone(),
        })
    }

    /// Byte offset of the cursor's character position.
    fn byte_index(&self) -> usize {
        self.name_input
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.name_input.len())
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        let index = self.byte_index();
        self.name_input.insert(index, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let remove_at = self
            .name_input
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position - 1);
        if let Some(index) = remove_at {
            self.name_input.remove(index);
            self.cursor_position -= 1;
        }
    }

    /// Move cursor left.
    const fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    /// Move cursor right.
    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.name_input.chars().count() {
            self.cursor_position += 1;
        }
    }

    // -- tracker screen: task list --------------------------------------

    fn handle_task_list_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(ApiCommand::Logout),
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.focus = TrackerFocus::Input;
                None
            }
            (KeyCode::Up | KeyCode::Char('k'), _) => {
                self.prev_task();
                None
            }
            (KeyCode::Down | KeyCode::Char('j'), _) => {
                self.next_task();
                None
            }
            (KeyCode::Char(' ') | KeyCode::Enter, _) => self
                .selected_task_record()
                .filter(|t| t.can_toggle())
                .map(|t| ApiCommand::ToggleTask { id: t.id }),
            (KeyCode::Char('c'), _) => self
                .selected_task_record()
                .filter(|t| t.can_complete())
                .map(|t| ApiCommand::CompleteTask { id: t.id }),
            (KeyCode::Char('d'), _) => self
                .selected_task_record()
                .filter(|t| t.can_delete())
                .map(|t| ApiCommand::DeleteTask { id: t.id }),
            (KeyCode::Char('r'), _) => Some(ApiCommand::FetchTasks),
            _ => None,
        }
    }

    /// Select the previous task.
    const fn prev_task(&mut self) {
        if self.selected_task > 0 {
            self.selected_task -= 1;
        }
    }

    /// Select the next task.
    fn next_task(&mut self) {
        if self.selected_task < self.tasks.len().saturating_sub(1) {
            self.selected_task += 1;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_task = self.selected_task.min(self.tasks.len().saturating_sub(1));
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
