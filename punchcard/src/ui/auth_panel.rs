//! Auth screen rendering (login/register card).

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, AuthField, AuthMode};
use crate::session::NoticeLevel;

/// Render the centered auth card.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let fields = form_fields(app);
    // Title + notice + bordered fields + hint, with a blank line around.
    let card_height = u16::try_from(fields.len()).unwrap_or(2) * 3 + 5;
    let card = centered_card(area, 46, card_height);

    let title = match app.auth_mode {
        AuthMode::Login => "Log in",
        AuthMode::Register => "Register",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::highlighted());
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    render_notice(frame, rows[0], app);

    for (i, (label, value, field)) in fields.iter().enumerate() {
        render_field(frame, rows[i + 1], label, value, app.auth_field == *field);
    }

    let switch_hint = match app.auth_mode {
        AuthMode::Login => "No account? Ctrl+R to register",
        AuthMode::Register => "Have an account? Ctrl+R to log in",
    };
    frame.render_widget(
        Paragraph::new(Line::styled(switch_hint, theme::dimmed())).centered(),
        rows[fields.len() + 1],
    );
}

/// The form's visible fields, in focus order.
fn form_fields(app: &App) -> Vec<(&'static str, String, AuthField)> {
    let password_mask = "\u{2022}".repeat(app.password_input.chars().count());
    match app.auth_mode {
        AuthMode::Login => vec![
            ("Username", app.username_input.clone(), AuthField::Username),
            ("Password", password_mask, AuthField::Password),
        ],
        AuthMode::Register => vec![
            ("Username", app.username_input.clone(), AuthField::Username),
            ("Email", app.email_input.clone(), AuthField::Email),
            ("Password", password_mask, AuthField::Password),
        ],
    }
}

fn render_notice(frame: &mut Frame, area: Rect, app: &App) {
    let Some(notice) = app.session.notice() else {
        return;
    };
    let style = match notice.level {
        NoticeLevel::Info => theme::notice_info(),
        NoticeLevel::Error => theme::notice_error(),
    };
    frame.render_widget(
        Paragraph::new(Line::styled(notice.text.clone(), style)).centered(),
        area,
    );
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border_style = if focused {
        theme::highlighted()
    } else {
        theme::normal()
    };
    let paragraph = Paragraph::new(value.to_string()).block(
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

/// A rect of at most `width` x `height`, centered in `area`.
fn centered_card(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
