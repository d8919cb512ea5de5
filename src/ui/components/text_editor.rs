//! Multi-line text entry with scrolling.
//!
//! Backs the steps field: a bordered box of editable lines with cursor
//! movement, line splitting and joining, and vertical scrolling. Columns
//! are character positions and get converted to byte offsets only at the
//! edit site, so multibyte input never lands between char boundaries.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Byte offset of character `col` in `line`; the line length when `col`
/// is past the end.
fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(offset, _)| offset)
}

/// Character count of a line.
fn width(line: &str) -> usize {
    line.chars().count()
}

/// Editable multi-line text area.
#[derive(Debug, Clone)]
pub struct TextEditor {
    /// The text, one entry per line. Never empty.
    lines: Vec<String>,
    /// Cursor line index.
    row: usize,
    /// Cursor column as a character position within the current line.
    col: usize,
    /// First line shown in the viewport.
    top: usize,
    /// Text shown while the buffer is empty.
    placeholder: String,
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::empty()
    }
}

impl TextEditor {
    /// Create an editor with no content.
    pub fn empty() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            top: 0,
            placeholder: String::new(),
        }
    }

    /// Create an editor seeded with `content`.
    pub fn with_content(content: &str) -> Self {
        let mut editor = Self::empty();
        if !content.is_empty() {
            editor.lines = content.lines().map(str::to_string).collect();
            if editor.lines.is_empty() {
                editor.lines.push(String::new());
            }
        }
        editor
    }

    /// Set the text shown while the buffer is empty.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// The buffer joined with newlines.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// True when nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Cursor position as (line, column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Handle a key event. Returns true when the buffer changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => {
                self.col = 0;
                false
            }
            KeyCode::Char('e') if ctrl => {
                self.col = width(&self.lines[self.row]);
                false
            }
            KeyCode::Char('u') if ctrl => self.kill_to_start(),
            KeyCode::Char('k') if ctrl => self.kill_to_end(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.break_line();
                true
            }
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                false
            }
            KeyCode::Down => {
                self.move_vertical(1);
                false
            }
            KeyCode::Home => {
                self.col = 0;
                false
            }
            KeyCode::End => {
                self.col = width(&self.lines[self.row]);
                false
            }
            _ => false,
        }
    }

    fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let at = byte_offset(line, self.col);
        line.insert(at, c);
        self.col += 1;
    }

    /// Split the current line at the cursor.
    fn break_line(&mut self) {
        let at = byte_offset(&self.lines[self.row], self.col);
        let rest = self.lines[self.row].split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    /// Delete the character before the cursor, joining lines at column 0.
    fn delete_backward(&mut self) -> bool {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let start = byte_offset(line, self.col - 1);
            let end = byte_offset(line, self.col);
            line.replace_range(start..end, "");
            self.col -= 1;
            true
        } else if self.row > 0 {
            let tail = self.lines.remove(self.row);
            self.row -= 1;
            self.col = width(&self.lines[self.row]);
            self.lines[self.row].push_str(&tail);
            true
        } else {
            false
        }
    }

    /// Delete the character under the cursor, joining lines at line end.
    fn delete_forward(&mut self) -> bool {
        if self.col < width(&self.lines[self.row]) {
            let line = &mut self.lines[self.row];
            let start = byte_offset(line, self.col);
            let end = byte_offset(line, self.col + 1);
            line.replace_range(start..end, "");
            true
        } else {
            self.join_next_line()
        }
    }

    fn kill_to_start(&mut self) -> bool {
        if self.col == 0 {
            return false;
        }
        let line = &mut self.lines[self.row];
        let at = byte_offset(line, self.col);
        line.replace_range(..at, "");
        self.col = 0;
        true
    }

    fn kill_to_end(&mut self) -> bool {
        if self.col < width(&self.lines[self.row]) {
            let at = byte_offset(&self.lines[self.row], self.col);
            self.lines[self.row].truncate(at);
            true
        } else {
            self.join_next_line()
        }
    }

    fn join_next_line(&mut self) -> bool {
        if self.row + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(self.row + 1);
        self.lines[self.row].push_str(&next);
        true
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = width(&self.lines[self.row]);
        }
    }

    fn move_right(&mut self) {
        if self.col < width(&self.lines[self.row]) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let target = self.row as isize + delta;
        if target < 0 || target as usize >= self.lines.len() {
            return;
        }
        self.row = target as usize;
        self.col = self.col.min(width(&self.lines[self.row]));
    }

    /// Keep the cursor line inside a viewport of `rows` lines. Leaves
    /// `top` at or above the cursor row even when the surrounding layout
    /// has squeezed the viewport to zero rows.
    fn scroll_into_view(&mut self, rows: usize) {
        if rows == 0 {
            self.top = self.top.min(self.row);
            return;
        }
        if self.row < self.top {
            self.top = self.row;
        } else if self.row >= self.top + rows {
            self.top = self.row + 1 - rows;
        }
    }

    /// Render the editor with a labeled border.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let rows = area.height.saturating_sub(2) as usize;
        self.scroll_into_view(rows);

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

        let text: Vec<Line> = if self.is_empty() {
            vec![Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.lines
                .iter()
                .enumerate()
                .skip(self.top)
                .take(rows)
                .map(|(index, line)| {
                    let mut style = Style::default();
                    if focused {
                        style = style.fg(Color::Yellow);
                        if index == self.row {
                            style = style.bg(Color::DarkGray);
                        }
                    }
                    Line::from(Span::styled(line.clone(), style))
                })
                .collect()
        };

        frame.render_widget(Paragraph::new(text).block(block), area);

        if focused {
            let x = area.x + 1 + self.col as u16;
            let y = area.y + 1 + (self.row - self.top) as u16;
            if x < area.x + area.width.saturating_sub(1)
                && y < area.y + area.height.saturating_sub(1)
            {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(editor: &mut TextEditor, text: &str) {
        for c in text.chars() {
            editor.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_starts_empty() {
        let editor = TextEditor::empty();
        assert!(editor.is_empty());
        assert_eq!(editor.content(), "");
        assert_eq!(editor.cursor(), (0, 0));
        assert_eq!(editor.line_count(), 1);
    }

    #[test]
    fn test_with_content_splits_lines() {
        let editor = TextEditor::with_content("first\nsecond");
        assert_eq!(editor.line_count(), 2);
        assert_eq!(editor.content(), "first\nsecond");
        assert!(!editor.is_empty());
    }

    #[test]
    fn test_typing_builds_content() {
        let mut editor = TextEditor::empty();
        type_str(&mut editor, "abc");
        assert_eq!(editor.content(), "abc");
        assert_eq!(editor.cursor(), (0, 3));
    }

    #[test]
    fn test_enter_splits_line_at_cursor() {
        let mut editor = TextEditor::empty();
        type_str(&mut editor, "abcd");
        editor.handle_input(key(KeyCode::Left));
        editor.handle_input(key(KeyCode::Left));
        editor.handle_input(key(KeyCode::Enter));

        assert_eq!(editor.content(), "ab\ncd");
        assert_eq!(editor.cursor(), (1, 0));
    }

    #[test]
    fn test_enter_splits_after_multibyte_char() {
        let mut editor = TextEditor::empty();
        type_str(&mut editor, "héllo");
        editor.handle_input(key(KeyCode::Left));
        editor.handle_input(key(KeyCode::Left));
        editor.handle_input(key(KeyCode::Left));
        editor.handle_input(key(KeyCode::Enter));

        assert_eq!(editor.content(), "hé\nllo");
    }

    #[test]
    fn test_backspace_removes_multibyte_char() {
        let mut editor = TextEditor::empty();
        type_str(&mut editor, "café");
        editor.handle_input(key(KeyCode::Backspace));
        assert_eq!(editor.content(), "caf");
    }

    #[test]
    fn test_backspace_at_column_zero_joins_lines() {
        let mut editor = TextEditor::with_content("ab\ncd");
        editor.handle_input(key(KeyCode::Down));
        editor.handle_input(key(KeyCode::Home));
        let changed = editor.handle_input(key(KeyCode::Backspace));

        assert!(changed);
        assert_eq!(editor.content(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn test_backspace_at_buffer_start_is_noop() {
        let mut editor = TextEditor::with_content("ab");
        editor.handle_input(key(KeyCode::Home));
        assert!(!editor.handle_input(key(KeyCode::Backspace)));
        assert_eq!(editor.content(), "ab");
    }

    #[test]
    fn test_delete_at_line_end_joins_lines() {
        let mut editor = TextEditor::with_content("ab\ncd");
        editor.handle_input(key(KeyCode::End));
        let changed = editor.handle_input(key(KeyCode::Delete));

        assert!(changed);
        assert_eq!(editor.content(), "abcd");
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut editor = TextEditor::with_content("long line\nab");
        editor.handle_input(key(KeyCode::End));
        assert_eq!(editor.cursor(), (0, 9));

        editor.handle_input(key(KeyCode::Down));
        assert_eq!(editor.cursor(), (1, 2));
    }

    #[test]
    fn test_horizontal_movement_wraps_lines() {
        let mut editor = TextEditor::with_content("ab\ncd");

        editor.handle_input(key(KeyCode::End));
        editor.handle_input(key(KeyCode::Right));
        assert_eq!(editor.cursor(), (1, 0));

        editor.handle_input(key(KeyCode::Left));
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn test_ctrl_a_and_ctrl_e_jump_within_line() {
        let mut editor = TextEditor::with_content("abcdef");
        editor.handle_input(ctrl('a'));
        assert_eq!(editor.cursor(), (0, 0));
        editor.handle_input(ctrl('e'));
        assert_eq!(editor.cursor(), (0, 6));
    }

    #[test]
    fn test_ctrl_u_kills_to_line_start() {
        let mut editor = TextEditor::with_content("abcdef");
        editor.handle_input(key(KeyCode::End));
        editor.handle_input(key(KeyCode::Left));
        editor.handle_input(key(KeyCode::Left));

        assert!(editor.handle_input(ctrl('u')));
        assert_eq!(editor.content(), "ef");
        assert_eq!(editor.cursor(), (0, 0));
    }

    #[test]
    fn test_ctrl_k_kills_to_line_end_then_joins() {
        let mut editor = TextEditor::with_content("abcd\nef");
        editor.handle_input(key(KeyCode::Right));
        editor.handle_input(key(KeyCode::Right));

        assert!(editor.handle_input(ctrl('k')));
        assert_eq!(editor.content(), "ab\nef");

        assert!(editor.handle_input(ctrl('k')));
        assert_eq!(editor.content(), "abef");
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut editor = TextEditor::with_content("0\n1\n2\n3\n4\n5\n6\n7");
        for _ in 0..6 {
            editor.handle_input(key(KeyCode::Down));
        }
        editor.scroll_into_view(3);
        assert_eq!(editor.top, 4);

        for _ in 0..6 {
            editor.handle_input(key(KeyCode::Up));
        }
        editor.scroll_into_view(3);
        assert_eq!(editor.top, 0);
    }

    #[test]
    fn test_collapsed_viewport_clamps_scroll() {
        let mut editor = TextEditor::with_content("0\n1\n2\n3\n4\n5\n6\n7");
        for _ in 0..7 {
            editor.handle_input(key(KeyCode::Down));
        }
        editor.scroll_into_view(3);
        assert_eq!(editor.top, 5);

        // Shrinking the terminal can leave the editor with no interior
        // rows; moving up must still pull `top` along with the cursor.
        for _ in 0..7 {
            editor.handle_input(key(KeyCode::Up));
            editor.scroll_into_view(0);
            assert!(editor.top <= editor.row);
        }
        assert_eq!(editor.top, 0);
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut editor = TextEditor::empty();
        editor.handle_input(ctrl('x'));
        assert!(editor.is_empty());
    }
}
