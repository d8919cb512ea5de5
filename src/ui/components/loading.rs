//! Spinner shown while a background task runs.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An animated spinner with a fixed label. Inert until [`start`] is
/// called; [`tick`] advances the animation.
///
/// [`start`]: LoadingIndicator::start
/// [`tick`]: LoadingIndicator::tick
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    label: String,
    frame: usize,
    running: bool,
}

impl LoadingIndicator {
    /// Create a stopped spinner with the given label.
    pub fn with_message(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            frame: 0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.frame = 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_active(&self) -> bool {
        self.running
    }

    /// Advance the animation by one frame. Does nothing while stopped.
    pub fn tick(&mut self) {
        if self.running {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
    }

    /// Draw the spinner and label. Draws nothing while stopped.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.running {
            return;
        }
        let line = format!("{} {}", FRAMES[self.frame], self.label);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().fg(Color::Yellow)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_stopped() {
        let spinner = LoadingIndicator::with_message("Working...");
        assert!(!spinner.is_active());
        assert_eq!(spinner.label, "Working...");
    }

    #[test]
    fn test_start_and_stop_toggle() {
        let mut spinner = LoadingIndicator::with_message("Working...");
        spinner.start();
        assert!(spinner.is_active());
        spinner.stop();
        assert!(!spinner.is_active());
    }

    #[test]
    fn test_tick_advances_only_while_running() {
        let mut spinner = LoadingIndicator::with_message("Working...");
        spinner.tick();
        assert_eq!(spinner.frame, 0);

        spinner.start();
        spinner.tick();
        assert_eq!(spinner.frame, 1);
    }

    #[test]
    fn test_animation_wraps_around() {
        let mut spinner = LoadingIndicator::with_message("Working...");
        spinner.start();
        spinner.frame = FRAMES.len() - 1;
        spinner.tick();
        assert_eq!(spinner.frame, 0);
    }

    #[test]
    fn test_start_rewinds_the_animation() {
        let mut spinner = LoadingIndicator::with_message("Working...");
        spinner.start();
        spinner.tick();
        spinner.tick();
        spinner.start();
        assert_eq!(spinner.frame, 0);
    }
}
