//! Game state module - one playfield session
//!
//! Ties together the board, the falling piece, the queued next piece and the score.
//! The session advances only through [`GameState::step`] / [`GameState::tick`]; input
//! events queued since the previous tick are applied first, in arrival order, and then
//! gravity moves the piece down one row or lands it.

use log::{debug, info};

use crate::pieces::Piece;
use crate::rng::{draw_shape, RandomSource, SimpleRng};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;
use crate::Board;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal: a freshly promoted piece had no legal spawn position.
    GameOver,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The active piece moved down one row
    Falling,
    /// The active piece was frozen and the next one spawned cleanly
    Locked { lines_cleared: u32 },
    /// The active piece was frozen and its successor collided at spawn
    GameOver,
    /// The session had already ended; nothing changed
    Halted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    current: Piece,
    next: Piece,
    rng: R,
    score: u32,
    status: GameStatus,
    /// Ticks processed while running.
    ticks: u64,
    /// Pieces that have become the active piece (including the first one).
    pieces_spawned: u32,
}

impl GameState<SimpleRng> {
    /// Create a new game on the standard board with a seeded LCG
    pub fn from_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::from_seed(1)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game on the standard 10x20 board
    pub fn new(rng: R) -> Self {
        Self::with_board(Board::standard(), rng)
    }

    /// Create a new game on a prepared board
    ///
    /// Draws the active piece and then the next piece. If the active piece does not fit
    /// at its spawn position the session starts already over.
    pub fn with_board(board: Board, mut rng: R) -> Self {
        let current = Piece::spawn(draw_shape(&mut rng), board.width());
        let next = Piece::spawn(draw_shape(&mut rng), board.width());

        let mut state = Self {
            board,
            current,
            next,
            rng,
            score: 0,
            status: GameStatus::Running,
            ticks: 0,
            pieces_spawned: 1,
        };

        if !state.fits(&state.current) {
            state.end_game();
        }
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece (still present after game over, at its blocked spawn position)
    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lines cleared so far; every cleared line scores exactly one point
    pub fn lines(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Apply every queued event in order, then run the gravity step
    pub fn step(&mut self, events: &[InputEvent]) -> TickOutcome {
        for &event in events {
            self.apply_input(event);
        }
        self.tick()
    }

    /// Apply a single input event
    ///
    /// Returns true when the piece actually moved or rotated. Blocked moves are normal
    /// and leave the state untouched. `Quit` belongs to the caller's loop and is ignored.
    pub fn apply_input(&mut self, event: InputEvent) -> bool {
        if self.game_over() {
            return false;
        }

        match event {
            InputEvent::MoveLeft => self.try_move(-1, 0),
            InputEvent::MoveRight => self.try_move(1, 0),
            InputEvent::SoftDrop => self.try_move(0, 1),
            InputEvent::Rotate => self.try_rotate(),
            InputEvent::Quit => false,
        }
    }

    /// Gravity step: fall one row, or land and bring in the next piece
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over() {
            return TickOutcome::Halted;
        }
        self.ticks += 1;

        if self.try_move(0, 1) {
            return TickOutcome::Falling;
        }
        self.lock_piece()
    }

    /// Check if the active piece could move by (dx, dy)
    pub fn can_move(&self, dx: i16, dy: i16) -> bool {
        self.board.can_place(
            &self.current.occupancy,
            self.current.x + dx,
            self.current.y + dy,
        )
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        if !self.can_move(dx, dy) {
            return false;
        }
        self.current.x += dx;
        self.current.y += dy;
        true
    }

    /// Try to rotate the active piece clockwise in place
    ///
    /// No kicks: the rotated matrix either fits at the same (x, y) or is dropped.
    fn try_rotate(&mut self) -> bool {
        let rotated = self.current.rotate_clockwise();
        if !self.fits(&rotated) {
            return false;
        }
        self.current = rotated;
        true
    }

    /// Freeze the active piece, clear lines, and promote the next piece
    fn lock_piece(&mut self) -> TickOutcome {
        self.board.freeze(&self.current);
        let lines_cleared = self.board.clear_full_lines() as u32;
        self.score += lines_cleared;

        debug!(
            "locked {} at ({}, {}), cleared {} line(s), score {}",
            self.current.kind.as_str(),
            self.current.x,
            self.current.y,
            lines_cleared,
            self.score
        );

        let incoming = Piece::spawn(draw_shape(&mut self.rng), self.board.width());
        self.current = std::mem::replace(&mut self.next, incoming);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        if !self.fits(&self.current) {
            self.end_game();
            return TickOutcome::GameOver;
        }

        TickOutcome::Locked { lines_cleared }
    }

    fn fits(&self, piece: &Piece) -> bool {
        self.board.can_place(&piece.occupancy, piece.x, piece.y)
    }

    fn end_game(&mut self) {
        self.status = GameStatus::GameOver;
        info!(
            "game over: {} blocked at spawn, score {}, {} piece(s), {} tick(s)",
            self.current.kind.as_str(),
            self.score,
            self.pieces_spawned,
            self.ticks
        );
    }

    /// Copy the render-facing state into an existing snapshot
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = Some(ActiveSnapshot::from(self.current));
        out.next = self.next.kind;
        out.score = self.score;
        out.ticks = self.ticks;
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
