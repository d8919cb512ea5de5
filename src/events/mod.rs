//! Terminal input events.
//!
//! Keyboard input and timer ticks come through here. Results of
//! background API work arrive separately, through the `tasks` channel.

mod handler;

pub use handler::EventHandler;

use crossterm::event::KeyEvent;

/// An event the main loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Key press from the terminal.
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Idle timeout; drives animations and channel polling.
    Tick,
}
