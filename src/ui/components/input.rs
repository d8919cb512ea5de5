//! Single-line text input widget.
//!
//! Holds one line of text plus a cursor, with the usual readline-style
//! movement and kill bindings. The cursor is a character position; all
//! edits go through [`TextInput::remove_chars`] or an insert at a byte
//! offset computed from it, so multibyte text is safe to edit.

use std::ops::Range;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// A single-line input field.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The text content.
    text: String,
    /// Cursor as a character position, 0..=char count.
    cursor: usize,
    /// Text shown while empty.
    placeholder: String,
}

impl TextInput {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input holding `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            placeholder: String::new(),
        }
    }

    /// Set the text shown while the input is empty.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// The current text.
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Replace the text, putting the cursor at the end.
    pub fn set_value(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    /// True when no text has been entered.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of character position `at`.
    fn byte_at(&self, at: usize) -> usize {
        self.text
            .char_indices()
            .nth(at)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    /// Remove a range of character positions.
    fn remove_chars(&mut self, range: Range<usize>) {
        let start = self.byte_at(range.start);
        let end = self.byte_at(range.end);
        self.text.replace_range(start..end, "");
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Start of the word before the cursor: skips any separators, then
    /// the alphanumeric run.
    fn word_start(&self) -> usize {
        let before: Vec<char> = self.text.chars().take(self.cursor).collect();
        let mut at = self.cursor;
        while at > 0 && !before[at - 1].is_alphanumeric() {
            at -= 1;
        }
        while at > 0 && before[at - 1].is_alphanumeric() {
            at -= 1;
        }
        at
    }

    /// Handle a key event. Returns true when the text changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                false
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.char_count();
                false
            }
            KeyCode::Char('u') if ctrl => {
                if self.cursor == 0 {
                    return false;
                }
                self.remove_chars(0..self.cursor);
                self.cursor = 0;
                true
            }
            KeyCode::Char('w') if ctrl => {
                let start = self.word_start();
                if start == self.cursor {
                    return false;
                }
                self.remove_chars(start..self.cursor);
                self.cursor = start;
                true
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c);
                true
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.remove_chars(self.cursor - 1..self.cursor);
                self.cursor -= 1;
                true
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_count() {
                    return false;
                }
                self.remove_chars(self.cursor..self.cursor + 1);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                false
            }
            _ => false,
        }
    }

    /// Render the input with a labeled border.
    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let (content, content_style) = if self.text.is_empty() {
            (
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            )
        } else if focused {
            (self.text.as_str(), Style::default().fg(Color::Yellow))
        } else {
            (self.text.as_str(), Style::default())
        };

        let border = if focused { Color::Yellow } else { Color::DarkGray };
        let title_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(format!(" {} ", label), title_style));

        frame.render_widget(
            Paragraph::new(content).style(content_style).block(block),
            area,
        );

        if focused {
            let x = area.x + 1 + self.cursor as u16;
            if x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position(Position::new(x, area.y + 1));
            }
        }
    }
}
