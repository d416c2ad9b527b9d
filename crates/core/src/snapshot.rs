//! Read-only view of a session, handed to the renderer once per tick.

use crate::pieces::{Occupancy, Piece};
use crate::types::{Cell, PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub occupancy: Occupancy,
    pub color: Rgb,
    pub x: i16,
    pub y: i16,
}

impl ActiveSnapshot {
    /// Board coordinates (x, y) of every filled cell
    pub fn filled_cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.occupancy
            .filled()
            .map(move |(r, c)| (self.x + c as i16, self.y + r as i16))
    }
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            occupancy: value.occupancy,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major board cells, `width * height` long
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub score: u32,
    pub ticks: u64,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Board cell at (x, y); None when out of range or empty
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.board
            .get(y * self.width as usize + x)
            .copied()
            .flatten()
    }

    pub fn clear(&mut self) {
        self.board.fill(None);
        self.active = None;
        self.next = PieceKind::I;
        self.score = 0;
        self.ticks = 0;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: vec![None; (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize)],
            active: None,
            next: PieceKind::I,
            score: 0,
            ticks: 0,
            game_over: false,
        }
    }
}
