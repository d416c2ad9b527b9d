//! Terminal presentation layer.
//!
//! Renders a game snapshot into a framebuffer of styled character cells and flushes it to
//! the terminal through crossterm. The view is pure; only [`TerminalRenderer`] does I/O.
//!
//! Each board cell is drawn two terminal columns wide to make up for the tall aspect ratio
//! of terminal glyphs.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
