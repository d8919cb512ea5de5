//! The bug report form view.
//!
//! This view renders the report form as a centered panel: a single-line
//! title input, a multi-line steps editor, two optional contact inputs,
//! and a submit button. Keyboard navigation follows the usual form
//! conventions: Tab/Shift+Tab cycle fields, Enter on a single-line field
//! advances, Enter on the button submits, Esc cancels.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::report::{ReportDraft, STEPS_PLACEHOLDER, TITLE_PLACEHOLDER};
use crate::ui::components::{centered_rect, LoadingIndicator, TextEditor, TextInput};

/// The form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormField {
    /// Single-line issue title.
    #[default]
    Title,
    /// Multi-line steps to reproduce; becomes the issue body.
    Steps,
    /// Optional GitHub username.
    Username,
    /// Optional email address.
    Email,
    /// The submit button.
    Submit,
}

impl ReportFormField {
    /// The next field in Tab order, wrapping around.
    fn next(self) -> Self {
        match self {
            ReportFormField::Title => ReportFormField::Steps,
            ReportFormField::Steps => ReportFormField::Username,
            ReportFormField::Username => ReportFormField::Email,
            ReportFormField::Email => ReportFormField::Submit,
            ReportFormField::Submit => ReportFormField::Title,
        }
    }

    /// The previous field in Tab order, wrapping around.
    fn prev(self) -> Self {
        match self {
            ReportFormField::Title => ReportFormField::Submit,
            ReportFormField::Steps => ReportFormField::Title,
            ReportFormField::Username => ReportFormField::Steps,
            ReportFormField::Email => ReportFormField::Username,
            ReportFormField::Submit => ReportFormField::Email,
        }
    }
}

/// Actions returned from the report form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormAction {
    /// Close the form without submitting.
    Cancel,
    /// Submit the report.
    Submit,
}

/// The bug report form.
pub struct ReportFormView {
    /// Title input.
    title_input: TextInput,
    /// Steps editor.
    steps_editor: TextEditor,
    /// Optional GitHub username input.
    username_input: TextInput,
    /// Optional email input.
    email_input: TextInput,
    /// The currently focused field.
    focus: ReportFormField,
    /// Whether a submission is in flight.
    submitting: bool,
    /// Spinner shown while submitting.
    loading: LoadingIndicator,
}

impl Default for ReportFormView {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormView {
    /// Create a new report form.
    pub fn new() -> Self {
        let mut title_input = TextInput::new();
        title_input.set_placeholder(TITLE_PLACEHOLDER);

        let mut steps_editor = TextEditor::empty();
        steps_editor.set_placeholder(STEPS_PLACEHOLDER);

        Self {
            title_input,
            steps_editor,
            username_input: TextInput::new(),
            email_input: TextInput::new(),
            focus: ReportFormField::Title,
            submitting: false,
            loading: LoadingIndicator::with_message("Submitting bug report..."),
        }
    }

    /// Prefill the optional contact fields.
    pub fn prefill_contact(&mut self, username: &str, email: &str) {
        if !username.is_empty() {
            self.username_input.set_value(username);
        }
        if !email.is_empty() {
            self.email_input.set_value(email);
        }
    }

    /// The currently focused field.
    pub fn focus(&self) -> ReportFormField {
        self.focus
    }

    /// Build a draft from the current field values.
    pub fn draft(&self) -> ReportDraft {
        ReportDraft {
            title: self.title_input.value().to_string(),
            steps: self.steps_editor.content(),
            username: self.username_input.value().to_string(),
            email: self.email_input.value().to_string(),
        }
    }

    /// Set the submitting state, locking the form while true.
    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
        if submitting {
            self.loading.start();
        } else {
            self.loading.stop();
        }
    }

    /// Check if a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.loading.tick();
    }

    /// Handle keyboard input.
    ///
    /// Returns an optional action to be handled by the parent. Input is
    /// ignored while a submission is in flight.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ReportFormAction> {
        if self.submitting {
            return None;
        }

        match (key.code, key.modifiers) {
            // Tab - next field
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.focus = self.focus.next();
                None
            }
            // Shift+Tab or BackTab - previous field
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.focus = self.focus.prev();
                None
            }
            // Escape - cancel
            (KeyCode::Esc, _) => Some(ReportFormAction::Cancel),
            // Enter on the button - submit
            (KeyCode::Enter, KeyModifiers::NONE) if self.focus == ReportFormField::Submit => {
                Some(ReportFormAction::Submit)
            }
            // Enter in single-line fields - move to next field
            (KeyCode::Enter, KeyModifiers::NONE) if self.focus != ReportFormField::Steps => {
                self.focus = self.focus.next();
                None
            }
            // Everything else goes to the focused field
            _ => {
                self.handle_field_input(key);
                None
            }
        }
    }

    /// Route input to the focused field.
    fn handle_field_input(&mut self, key: KeyEvent) {
        match self.focus {
            ReportFormField::Title => {
                self.title_input.handle_input(key);
            }
            ReportFormField::Steps => {
                self.steps_editor.handle_input(key);
            }
            ReportFormField::Username => {
                self.username_input.handle_input(key);
            }
            ReportFormField::Email => {
                self.email_input.handle_input(key);
            }
            ReportFormField::Submit => {}
        }
    }

    /// Render the form as a centered panel.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let panel_width = 76u16.min(area.width.saturating_sub(2));
        let panel_height = 22u16.min(area.height.saturating_sub(2));
        let panel_area = centered_rect(area, panel_width, panel_height);

        frame.render_widget(Clear, panel_area);

        let block = Block::default()
            .title(Span::styled(
                " Report a Bug ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(panel_area);
        frame.render_widget(block, panel_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(5),    // Steps (multi-line)
                Constraint::Length(3), // Username (optional)
                Constraint::Length(3), // Email (optional)
                Constraint::Length(1), // Status
                Constraint::Length(1), // Submit button
            ])
            .split(inner);

        self.title_input.render(
            frame,
            chunks[0],
            "Title *",
            self.focus == ReportFormField::Title,
        );
        self.steps_editor.render(
            frame,
            chunks[1],
            "Steps *",
            self.focus == ReportFormField::Steps,
        );
        self.username_input.render(
            frame,
            chunks[2],
            "Your Github account (Optional)",
            self.focus == ReportFormField::Username,
        );
        self.email_input.render(
            frame,
            chunks[3],
            "Your Email address (Optional)",
            self.focus == ReportFormField::Email,
        );

        self.render_status(frame, chunks[4]);
        self.render_submit_button(frame, chunks[5], self.focus == ReportFormField::Submit);
    }

    /// Render the status line below the fields.
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if self.submitting {
            self.loading.render(frame, area);
        }
    }

    /// Render the submit button.
    fn render_submit_button(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let button_style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };

        let button_text = if self.submitting {
            " Submitting... "
        } else {
            " [Enter] Submit Bug Report "
        };

        let button =
            Paragraph::new(Span::styled(button_text, button_style)).alignment(Alignment::Center);
        frame.render_widget(button, area);
    }
}
