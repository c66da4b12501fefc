//! Tracker screen rendering (new-task input + task list).

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use punchcard_proto::task::{Task, TaskPhase};
use punchcard_proto::time::format_hms;

use super::theme;
use crate::app::{App, TrackerFocus};

/// Render the tracker screen (input box + task list).
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_input(frame, chunks[0], app);
    render_list(frame, chunks[1], app);
}

/// Render the new-task name input.
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == TrackerFocus::Input;

    let line = if is_focused {
        line_with_cursor(&app.name_input, app.cursor_position)
    } else {
        Line::styled(app.name_input.clone(), theme::normal())
    };

    let block = Block::default()
        .title("New task")
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Splits `text` at the cursor's character index and renders the cursor
/// as a reversed cell.
fn line_with_cursor(text: &str, cursor: usize) -> Line<'static> {
    let before: String = text.chars().take(cursor).collect();
    let at: String = text.chars().skip(cursor).take(1).collect();
    let after: String = text.chars().skip(cursor + 1).collect();

    let cursor_cell = if at.is_empty() { " ".to_string() } else { at };
    Line::from(vec![
        Span::styled(before, theme::normal()),
        Span::styled(cursor_cell, theme::input_cursor()),
        Span::styled(after, theme::normal()),
    ])
}

/// Render the task list, or the empty-state message.
fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == TrackerFocus::TaskList;

    let block = Block::default()
        .title(Span::styled(
            "Tasks",
            theme::panel_title(theme::TASKS_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    if app.tasks.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No tasks yet. Add the first one!",
            theme::dimmed(),
        ))
        .centered()
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app.tasks.tasks().iter().map(task_row).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if is_focused {
        state.select(Some(app.selected_task));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// One task row: phase symbol, name, elapsed time.
fn task_row(task: &Task) -> ListItem<'static> {
    let (symbol, symbol_style, name_style, time_style) = match task.phase() {
        TaskPhase::Running => (
            "\u{25b6}",
            theme::running_time(),
            theme::bold(),
            theme::running_time(),
        ),
        TaskPhase::Stopped => ("\u{23f8}", theme::dimmed(), theme::normal(), theme::normal()),
        TaskPhase::Completed => (
            "\u{2713}",
            theme::dimmed(),
            theme::completed(),
            theme::dimmed(),
        ),
    };

    let line = Line::from(vec![
        Span::styled(symbol, symbol_style),
        Span::raw(" "),
        Span::styled(task.name.clone(), name_style),
        Span::raw("  "),
        Span::styled(format_hms(task.time_elapsed), time_style),
    ]);

    ListItem::new(line)
}
