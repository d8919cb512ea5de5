//! The submission result view.
//!
//! Shown after a bug report has been filed successfully. Displays the
//! issue URL and offers to open it in the browser.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::components::centered_rect;

/// Actions returned from the result view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    /// Open the issue URL in the browser.
    Open,
    /// Close the application.
    Done,
}

/// The post-submission view holding the filed issue URL.
#[derive(Debug, Default)]
pub struct ResultView {
    /// URL of the filed issue.
    url: String,
    /// Project address for mailing in extra details, empty when unset.
    contact: String,
}

impl ResultView {
    /// Create an empty result view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the issue URL to display.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// The issue URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set the contact address offered for emailed follow-ups.
    pub fn set_contact(&mut self, contact: impl Into<String>) {
        self.contact = contact.into();
    }

    /// The contact address, empty when none is configured.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Handle keyboard input.
    pub fn handle_input(&self, key: KeyEvent) -> Option<ResultAction> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('o') | KeyCode::Char('O') => Some(ResultAction::Open),
            KeyCode::Esc | KeyCode::Char('q') => Some(ResultAction::Done),
            _ => None,
        }
    }

    /// Render the result as a centered panel.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(""),
            Line::from("Thank you for helping us improve this software!"),
            Line::from("You can track progress, or attach a data file or screenshot,"),
            Line::from("on the issue page:"),
            Line::from(""),
            Line::from(Span::styled(
                self.url.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )),
        ];
        if !self.contact.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("or by email to {}.", self.contact)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter/o] Open in browser    [Esc/q] Close",
            Style::default().fg(Color::DarkGray),
        )));

        let panel_width = 72u16.min(area.width.saturating_sub(2));
        let panel_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
        let panel_area = centered_rect(area, panel_width, panel_height);

        frame.render_widget(Clear, panel_area);

        let block = Block::default()
            .title(Span::styled(
                " Bug Report Submitted ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, panel_area);
    }
}
