//! Integration tests for TUI state and rendering.
//!
//! Renders the real UI into a `TestBackend` buffer and asserts on what a
//! user would actually see: the auth gate, elapsed-time formatting, the
//! empty state, and which controls are offered per task phase.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use ratatui::{Terminal, backend::TestBackend};

use punchcard::api::ApiEvent;
use punchcard::app::{App, TrackerFocus};
use punchcard::ui;
use punchcard_proto::task::{Task, TaskId};

fn task(id: i64, name: &str, running: bool, completed: bool, elapsed: u64) -> Task {
    Task {
        id: TaskId::new(id),
        name: name.to_string(),
        is_running: running,
        is_completed: completed,
        time_elapsed: elapsed,
    }
}

fn logged_in_app(tasks: Vec<Task>) -> App {
    let mut app = App::new();
    app.apply_api_event(ApiEvent::LoginSucceeded {
        username: "alice".to_string(),
    });
    app.apply_api_event(ApiEvent::TasksFetched { tasks });
    app
}

/// Renders the full UI into an 80x24 buffer and flattens it to a string.
fn render_to_text(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                text.push_str(cell.symbol());
            }
        }
        text.push('\n');
    }
    text
}

#[test]
fn unauthenticated_app_renders_login_card() {
    let app = App::new();
    let text = render_to_text(&app);
    assert!(text.contains("Log in"));
    assert!(text.contains("Username"));
    assert!(text.contains("Password"));
    // No tracker chrome while logged out.
    assert!(!text.contains("New task"));
}

#[test]
fn register_mode_renders_email_field() {
    let mut app = App::new();
    app.handle_key_event(crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Char('r'),
        crossterm::event::KeyModifiers::CONTROL,
    ));
    let text = render_to_text(&app);
    assert!(text.contains("Register"));
    assert!(text.contains("Email"));
}

#[test]
fn empty_task_list_renders_empty_state() {
    let app = logged_in_app(vec![]);
    let text = render_to_text(&app);
    assert!(text.contains("New task"));
    assert!(text.contains("No tasks yet. Add the first one!"));
}

#[test]
fn task_rows_render_name_and_formatted_time() {
    let app = logged_in_app(vec![
        task(1, "Write report", false, false, 61),
        task(2, "Review patch", false, false, 3661),
    ]);
    let text = render_to_text(&app);
    assert!(text.contains("Write report"));
    assert!(text.contains("00:01:01"));
    assert!(text.contains("Review patch"));
    assert!(text.contains("01:01:01"));
}

#[test]
fn phase_symbols_distinguish_rows() {
    let app = logged_in_app(vec![
        task(1, "Running one", true, false, 5),
        task(2, "Done one", false, true, 50),
    ]);
    let text = render_to_text(&app);
    assert!(text.contains('\u{25b6}'));
    assert!(text.contains('\u{2713}'));
}

#[test]
fn three_ticks_after_toggle_render_three_seconds() {
    let mut app = logged_in_app(vec![task(1, "Write report", false, false, 0)]);
    app.apply_api_event(ApiEvent::TaskToggled {
        task: task(1, "Write report", true, false, 0),
    });
    for _ in 0..3 {
        app.tasks.tick();
    }
    let text = render_to_text(&app);
    assert!(text.contains("00:00:03"));
}

#[test]
fn completed_selection_offers_no_complete_control() {
    let mut app = logged_in_app(vec![task(1, "Done one", false, true, 9)]);
    app.focus = TrackerFocus::TaskList;
    let text = render_to_text(&app);
    assert!(text.contains("d: delete"));
    assert!(!text.contains("c: complete"));
    assert!(!text.contains("start/pause"));
}

#[test]
fn active_selection_offers_toggle_and_complete_controls() {
    let mut app = logged_in_app(vec![task(1, "Write report", false, false, 0)]);
    app.focus = TrackerFocus::TaskList;
    let text = render_to_text(&app);
    assert!(text.contains("start/pause"));
    assert!(text.contains("c: complete"));
}

#[test]
fn session_expiry_returns_to_login_with_notice() {
    let mut app = logged_in_app(vec![task(1, "Write report", true, false, 0)]);
    app.apply_api_event(ApiEvent::SessionExpired);
    let text = render_to_text(&app);
    assert!(text.contains("Log in"));
    assert!(text.contains("expired"));
    assert!(!text.contains("Write report"));
}

#[test]
fn status_bar_shows_current_user() {
    let app = logged_in_app(vec![]);
    let text = render_to_text(&app);
    assert!(text.contains("alice"));
}

#[test]
fn rendered_completed_rows_are_never_ticking() {
    let mut app = logged_in_app(vec![
        task(1, "Running one", true, false, 0),
        task(2, "Done one", false, true, 7),
    ]);
    for _ in 0..5 {
        app.tasks.tick();
    }
    // The completed row's display never advanced.
    let text = render_to_text(&app);
    assert!(text.contains("00:00:05"));
    assert!(text.contains("00:00:07"));
}
