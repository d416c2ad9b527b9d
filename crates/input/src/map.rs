//! Key mapping from terminal events to input events.
//!
//! Arrow keys, WASD and vi-style HJKL all work; letters match in either case.

use crate::types::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to an input event.
pub fn handle_key_event(key: KeyEvent) -> Option<InputEvent> {
    if should_quit(key) {
        return Some(InputEvent::Quit);
    }

    match key.code {
        KeyCode::Left => Some(InputEvent::MoveLeft),
        KeyCode::Right => Some(InputEvent::MoveRight),
        KeyCode::Down => Some(InputEvent::SoftDrop),
        KeyCode::Up => Some(InputEvent::Rotate),
        KeyCode::Char(c) => map_char(c.to_ascii_lowercase()),
        _ => None,
    }
}

fn map_char(c: char) -> Option<InputEvent> {
    match c {
        'a' | 'h' => Some(InputEvent::MoveLeft),
        'd' | 'l' => Some(InputEvent::MoveRight),
        's' | 'j' => Some(InputEvent::SoftDrop),
        'w' | 'k' | ' ' => Some(InputEvent::Rotate),
        _ => None,
    }
}

/// Check if key should end the session.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&'q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
