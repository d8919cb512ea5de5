//! Transient toast notifications.
//!
//! Toasts stack in the bottom-right corner and expire on their own;
//! [`NotificationManager::tick`] drops the ones whose time is up.

use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Widest a toast is allowed to get.
const TOAST_WIDTH: u16 = 50;

/// Oldest toasts are evicted past this count.
const MAX_TOASTS: usize = 4;

/// What a toast is telling the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotificationKind {
    Info,
    Error,
}

impl NotificationKind {
    fn symbol(self) -> &'static str {
        match self {
            NotificationKind::Info => "ℹ",
            NotificationKind::Error => "✖",
        }
    }

    fn color(self) -> Color {
        match self {
            NotificationKind::Info => Color::Cyan,
            NotificationKind::Error => Color::Red,
        }
    }

    /// How long a toast of this kind stays on screen.
    fn ttl(self) -> Duration {
        match self {
            NotificationKind::Info => Duration::from_secs(3),
            NotificationKind::Error => Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
struct Notification {
    text: String,
    kind: NotificationKind,
    expires_at: Instant,
}

/// Owns the active toasts and draws them as an overlay.
#[derive(Debug, Clone, Default)]
pub struct NotificationManager {
    toasts: Vec<Notification>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show an informational toast.
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), NotificationKind::Info);
    }

    /// Show an error toast.
    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), NotificationKind::Error);
    }

    fn push(&mut self, text: String, kind: NotificationKind) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.remove(0);
        }
        self.toasts.push(Notification {
            text,
            kind,
            expires_at: Instant::now() + kind.ttl(),
        });
    }

    /// Drop toasts whose display time has run out.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Render the toasts stacked upward from the bottom-right corner.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
        if width < 6 {
            return;
        }
        let inner = width.saturating_sub(2) as usize;

        let mut bottom = area.bottom().saturating_sub(1);
        for toast in self.toasts.iter().rev() {
            let text = format!("{} {}", toast.kind.symbol(), toast.text);
            let chars = text.chars().count().max(1);
            let rows = ((chars - 1) / inner + 1) as u16;
            let height = rows + 2;
            if bottom < area.y + height {
                break;
            }

            let rect = Rect {
                x: area.right().saturating_sub(width + 1),
                y: bottom - height,
                width,
                height,
            };
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(toast.kind.color()))
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(toast.kind.color())),
                    ),
                rect,
            );
            bottom = rect.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_and_error_are_queued() {
        let mut toasts = NotificationManager::new();
        assert!(toasts.is_empty());

        toasts.info("saved");
        toasts.error("nope");
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts.toasts[0].kind, NotificationKind::Info);
        assert_eq!(toasts.toasts[1].kind, NotificationKind::Error);
    }

    #[test]
    fn test_tick_drops_expired_toasts() {
        let mut toasts = NotificationManager::new();
        toasts.info("old news");
        toasts.toasts[0].expires_at = Instant::now() - Duration::from_secs(1);

        toasts.tick();
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_tick_keeps_fresh_toasts() {
        let mut toasts = NotificationManager::new();
        toasts.info("just now");
        toasts.tick();
        assert_eq!(toasts.len(), 1);
    }

    #[test]
    fn test_backlog_evicts_oldest_first() {
        let mut toasts = NotificationManager::new();
        for n in 0..=MAX_TOASTS {
            toasts.info(format!("toast {}", n));
        }
        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts.toasts[0].text, "toast 1");
    }

    #[test]
    fn test_errors_outlive_infos() {
        assert!(NotificationKind::Error.ttl() > NotificationKind::Info.ttl());
    }
}
