//! Shared types and constants.
//!
//! Everything here is plain data with no external dependencies, so it can be used by the
//! core rules, the terminal view and the input layer alike.
//!
//! # Playfield
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICKS_PER_SECOND` | 10 | Fixed tick rate |
//! | `TICK_MS` | 100 | Interval between ticks |
//!
//! One tick applies all queued input and then moves the active piece down one row.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{InputEvent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let event = InputEvent::from_str("rotate").unwrap();
//! assert_eq!(event, InputEvent::Rotate);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed tick rate of the game clock
pub const TICKS_PER_SECOND: u32 = 10;

/// Interval between ticks in milliseconds
pub const TICK_MS: u32 = 1000 / TICKS_PER_SECOND;

/// Largest bounding box side of any catalog shape
pub const MAX_SHAPE_SIDE: usize = 4;


/// The seven piece kinds, in catalog order
///
/// - **I**: Cyan, 1x4 bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **L**: Orange, L-shaped
/// - **J**: Blue, J-shaped (mirror of L)
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Position of this kind in the shape catalog
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter name, as shown in the side panel
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Discrete input events fed to the game once per tick
///
/// These are the only five symbols the input layer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Stop the session
    Quit,
}

impl InputEvent {
    /// Parse event from string (case-insensitive, camelCase accepted)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::InputEvent;
    ///
    /// assert_eq!(InputEvent::from_str("moveLeft"), Some(InputEvent::MoveLeft));
    /// assert_eq!(InputEvent::from_str("softdrop"), Some(InputEvent::SoftDrop));
    /// assert_eq!(InputEvent::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputEvent::MoveLeft),
            "moveright" => Some(InputEvent::MoveRight),
            "softdrop" => Some(InputEvent::SoftDrop),
            "rotate" => Some(InputEvent::Rotate),
            "quit" => Some(InputEvent::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputEvent::MoveLeft => "moveLeft",
            InputEvent::MoveRight => "moveRight",
            InputEvent::SoftDrop => "softDrop",
            InputEvent::Rotate => "rotate",
            InputEvent::Quit => "quit",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Rgb)`: Cell frozen with the color of the piece that landed there
pub type Cell = Option<Rgb>;

/// Configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board requested with a zero dimension
    InvalidDimensions { width: u8, height: u8 },
    /// A configuration value could not be parsed
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidDimensions { .. } => "invalid_dimensions",
            ConfigError::InvalidValue { .. } => "invalid_value",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConfigError::InvalidDimensions { .. } => "board width and height must be positive",
            ConfigError::InvalidValue { .. } => "configuration value could not be parsed",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimensions { width, height } => {
                write!(f, "{}: requested {}x{}", self.message(), width, height)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{}: {}={:?}", self.message(), key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
