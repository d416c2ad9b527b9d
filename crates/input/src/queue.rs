//! Per-tick input buffer.
//!
//! Key events arrive at any time between ticks. The queue keeps them in arrival order and
//! hands the whole batch to the game at the next tick boundary. Quit never reaches the game;
//! it only raises a flag the loop checks.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::handle_key_event;
use crate::types::InputEvent;

/// Upper bound on events buffered within a single tick.
///
/// At 10 ticks/second this is far above any human key rate; extra events are dropped.
pub const MAX_EVENTS_PER_TICK: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: ArrayVec<InputEvent, MAX_EVENTS_PER_TICK>,
    quit: bool,
    dropped: u32,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event. Returns false if it was dropped because the buffer is full.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if event == InputEvent::Quit {
            self.quit = true;
            return true;
        }
        if self.pending.try_push(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        true
    }

    /// Map and queue a terminal key event.
    ///
    /// Presses and auto-repeats count; releases are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<InputEvent> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let event = handle_key_event(key)?;
        self.push(event);
        Some(event)
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> ArrayVec<InputEvent, MAX_EVENTS_PER_TICK> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Events discarded because a tick's buffer was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
