//! Terminal input module.
//!
//! Maps `crossterm` key events onto the five [`crate::types::InputEvent`] symbols and
//! buffers them between ticks so the game sees them in arrival order.

pub mod map;
pub mod queue;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
pub use queue::{EventQueue, MAX_EVENTS_PER_TICK};
