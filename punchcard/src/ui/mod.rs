//! Terminal UI rendering.

pub mod auth_panel;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
///
/// The auth screen gates the tracker: which one renders follows the
/// session state directly.
pub fn draw(frame: &mut Frame, app: &App) {
    // Create main layout with status bar at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];

    if app.session.is_authenticated() {
        task_panel::render(frame, content_area, app);
    } else {
        auth_panel::render(frame, content_area, app);
    }

    status_bar::render(frame, status_area, app);
}
