//! Modal dialogs that block input while visible.
//!
//! Two dialogs share the same dismiss-on-Enter/Esc contract: a notice
//! dialog for validation messages and an error dialog for failures.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Calculate a centered rectangle within the given area.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// A dismissible notice dialog, used for validation messages.
#[derive(Debug, Default)]
pub struct NoticeDialog {
    title: String,
    message: String,
    visible: bool,
}

impl NoticeDialog {
    /// Create a new hidden notice dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the dialog with the given title and message.
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.visible = true;
    }

    /// Dismiss the dialog.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Check if the dialog is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the current message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render the dialog centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        render_dialog(frame, area, &self.title, &self.message, Color::Yellow);
    }
}

/// A dismissible error dialog, used for submission failures.
#[derive(Debug, Default)]
pub struct ErrorDialog {
    title: String,
    message: String,
    visible: bool,
}

impl ErrorDialog {
    /// Create a new hidden error dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the dialog with the given title and message.
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.title = title.into();
        self.message = message.into();
        self.visible = true;
    }

    /// Dismiss the dialog.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Check if the dialog is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the current message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render the dialog centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        render_dialog(frame, area, &self.title, &self.message, Color::Red);
    }
}

/// Render a dialog box with a wrapped message and a dismiss hint.
fn render_dialog(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let width = 56u16.min(area.width.saturating_sub(4));
    let inner_width = width.saturating_sub(2) as usize;
    let message_lines = if inner_width > 0 {
        (message.len() + inner_width - 1) / inner_width
    } else {
        1
    };
    let height = (message_lines as u16 + 4).min(area.height.saturating_sub(2));

    let dialog_area = centered_rect(area, width, height);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let body = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);
    frame.render_widget(body, chunks[0]);

    let hint = Paragraph::new(Span::styled(
        "[Enter] OK",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[1]);
}
