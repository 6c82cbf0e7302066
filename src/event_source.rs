//! Input events behind a trait, so the run loop can be fed scripted input

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
pub use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

pub trait EventSource {
    /// Wait up to `timeout` for an event to become available
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Next event; blocks when none is pending
    fn read(&mut self) -> Result<Event>;
}

/// Keyboard, mouse and resize events from the controlling terminal
pub struct TerminalEventSource;

impl EventSource for TerminalEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(crossterm::event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(crossterm::event::read()?)
    }
}

/// Replays a fixed list of events. Once drained, every read yields `q`
/// so a run loop under test always terminates.
pub struct SimulatedEventSource {
    pending: VecDeque<Event>,
}

impl SimulatedEventSource {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            pending: events.into_iter().collect(),
        }
    }

    /// Events not read yet
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn key_event(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        })
    }

    pub fn char_key(c: char) -> Event {
        Self::key_event(KeyCode::Char(c), KeyModifiers::empty())
    }

    pub fn ctrl_char_key(c: char) -> Event {
        Self::key_event(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Mouse event at a terminal cell
    pub fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    pub fn left_down(column: u16, row: u16) -> Event {
        Self::mouse_event(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    pub fn left_drag(column: u16, row: u16) -> Event {
        Self::mouse_event(MouseEventKind::Drag(MouseButton::Left), column, row)
    }

    pub fn left_up(column: u16, row: u16) -> Event {
        Self::mouse_event(MouseEventKind::Up(MouseButton::Left), column, row)
    }
}

impl EventSource for SimulatedEventSource {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.pending.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        Ok(self
            .pending
            .pop_front()
            .unwrap_or_else(|| Self::char_key('q')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_keys_and_mouse_in_order() {
        let mut source = SimulatedEventSource::new([
            SimulatedEventSource::char_key('l'),
            SimulatedEventSource::left_down(4, 7),
            SimulatedEventSource::ctrl_char_key('c'),
        ]);
        assert_eq!(source.remaining(), 3);
        assert!(source.poll(Duration::ZERO).unwrap());

        match source.read().unwrap() {
            Event::Key(key) => {
                assert_eq!(key.code, KeyCode::Char('l'));
                assert!(key.modifiers.is_empty());
            }
            other => panic!("expected key event, got {other:?}"),
        }

        match source.read().unwrap() {
            Event::Mouse(mouse) => {
                assert_eq!(mouse.kind, MouseEventKind::Down(MouseButton::Left));
                assert_eq!((mouse.column, mouse.row), (4, 7));
            }
            other => panic!("expected mouse event, got {other:?}"),
        }

        match source.read().unwrap() {
            Event::Key(key) => assert!(key.modifiers.contains(KeyModifiers::CONTROL)),
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn drained_source_answers_with_quit() {
        let mut source = SimulatedEventSource::new(Vec::new());
        assert!(!source.poll(Duration::ZERO).unwrap());
        assert_eq!(source.read().unwrap(), SimulatedEventSource::char_key('q'));
    }
}
