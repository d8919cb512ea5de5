//! Blocking reader for terminal events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent};

use super::Event;

/// How long [`EventHandler::next`] waits before giving up and ticking.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Turns crossterm events into [`Event`]s, one at a time.
pub struct EventHandler {
    tick: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick: TICK_INTERVAL,
        }
    }

    /// Wait for the next event. Returns [`Event::Tick`] when nothing
    /// happens within the tick interval, so the caller gets a steady
    /// beat for animations and channel polling.
    pub fn next(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick)? {
            return Ok(Event::Tick);
        }

        let event = match event::read()? {
            CrosstermEvent::Key(key) => Event::Key(key),
            CrosstermEvent::Resize(cols, rows) => Event::Resize(cols, rows),
            // Mouse, focus, and paste are ignored
            _ => Event::Tick,
        };
        Ok(event)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_uses_the_tick_interval() {
        assert_eq!(EventHandler::new().tick, TICK_INTERVAL);
        assert_eq!(EventHandler::default().tick, TICK_INTERVAL);
    }
}
