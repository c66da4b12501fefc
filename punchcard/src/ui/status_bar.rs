//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, TrackerFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = help_text(app);

    let user_span = app.session.username().map_or_else(
        || Span::styled("\u{25cb} logged out", theme::dimmed()),
        |name| Span::styled(format!("\u{25cf} {name}"), theme::normal().fg(theme::SUCCESS)),
    );

    let mut spans = vec![
        Span::styled("punchcard v0.1.0", theme::bold()),
        Span::raw(" | "),
        user_span,
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ];

    if let Some(message) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(message.clone(), theme::notice_error()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

/// Key hints for the current screen and selection.
///
/// Controls that do not apply to the selected task are omitted entirely:
/// a completed task is only ever offered deletion.
fn help_text(app: &App) -> &'static str {
    if !app.session.is_authenticated() {
        return "Enter: submit | Tab: next field | Ctrl+R: switch form | Esc: quit";
    }
    match app.focus {
        TrackerFocus::Input => "Enter: create task | Tab: task list | Ctrl+L: log out | Esc: quit",
        TrackerFocus::TaskList => match app.selected_task_record() {
            Some(task) if task.is_completed => {
                "\u{2191}\u{2193}/jk: navigate | d: delete | r: refresh | Tab: input | Ctrl+L: log out"
            }
            Some(_) => {
                "\u{2191}\u{2193}/jk: navigate | Space: start/pause | c: complete | r: refresh | Tab: input"
            }
            None => "r: refresh | Tab: input | Ctrl+L: log out | Esc: quit",
        },
    }
}
