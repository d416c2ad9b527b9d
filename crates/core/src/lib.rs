//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the game and nothing else: no terminal, no clock,
//! no input polling. A caller feeds it input events and ticks; it hands back snapshots.
//!
//! - **Deterministic**: piece selection goes through an injected [`RandomSource`], so a
//!   seed (or a scripted sequence) reproduces a session exactly
//! - **Self-contained sessions**: every [`GameState`] owns its board and pieces; several can
//!   run side by side
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with collision testing, freezing and line clearing
//! - [`game_state`]: one session: active/next piece, score, per-tick update
//! - [`pieces`]: the 7-shape catalog, occupancy matrices and clockwise rotation
//! - [`rng`]: uniform random piece selection behind the [`RandomSource`] trait
//! - [`snapshot`]: read-only view handed to the renderer
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every draw is an independent uniform pick among the 7 shapes
//! - **Rotation**: clockwise only, accepted in place or rejected; no wall kicks
//! - **Gravity**: one row per tick, after the tick's input has been applied
//! - **Scoring**: one point per cleared line
//! - **Game over**: the promoted next piece does not fit at its spawn position
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, TickOutcome};
//! use blockfall_types::InputEvent;
//!
//! let mut game = GameState::from_seed(12345);
//!
//! let outcome = game.step(&[InputEvent::MoveRight, InputEvent::Rotate]);
//! assert_eq!(outcome, TickOutcome::Falling);
//! assert_eq!(game.current().y, 1);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, GameStatus, TickOutcome};
pub use pieces::{catalog, get_shape, Occupancy, Piece, ShapeDefinition};
pub use rng::{draw_shape, RandomSource, ScriptedRandom, SimpleRng, ThreadRandom};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
