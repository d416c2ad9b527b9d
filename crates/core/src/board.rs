//! Board module - manages the game grid
//!
//! The board is a fixed `width x height` grid where each cell is empty or holds the color of
//! a frozen piece. Storage is a flat row-major vector.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom (row 0 is the top).
//!
//! Collision is asymmetric: the sides and the floor are hard walls, while
//! everything above row 0 counts as empty space so pieces can spawn and rotate partially
//! off-screen.

use crate::pieces::{Occupancy, Piece};
use crate::types::{Cell, ConfigError, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    ///
    /// Fails if either dimension is zero.
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; (width as usize) * (height as usize)],
        })
    }

    /// Create the standard 10x20 board
    pub fn standard() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![None; (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize)],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a piece cell may sit at (x, y)
    ///
    /// Columns outside the board and rows at or below the floor are never empty.
    /// Rows above the top (y < 0) are always empty.
    pub fn is_empty(&self, x: i16, y: i16) -> bool {
        if x < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return false;
        }
        if y < 0 {
            return true;
        }
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a matrix fits with its top-left cell at (x, y)
    pub fn can_place(&self, occupancy: &Occupancy, x: i16, y: i16) -> bool {
        occupancy
            .filled()
            .all(|(r, c)| self.is_empty(x + c as i16, y + r as i16))
    }

    /// Write the piece's color into every cell it covers
    ///
    /// Callers check `can_place` first. Cells that fall outside the grid are skipped.
    pub fn freeze(&mut self, piece: &Piece) {
        for (x, y) in piece.filled_cells() {
            self.set(x, y, Some(piece.color));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Remove every full row, shift the rows above down, and return how many were removed
    ///
    /// Rows are judged against the board as it was before any removal. The scan runs bottom
    /// to top with a separate write cursor; the cursor never passes the read row, so each row
    /// is tested before anything overwrites it.
    pub fn clear_full_lines(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Rows left above the write cursor become the fresh empty rows.
        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// Cells of row `y`
    ///
    /// # Panics
    ///
    /// Panics if `y` is not below `height()`.
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;
    use crate::types::{PieceKind, Rgb};

    #[test]
    fn test_board_index_calculation() {
        let board = Board::standard();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_board_rejects_zero_dimensions() {
        assert_eq!(
            Board::new(0, 20),
            Err(ConfigError::InvalidDimensions {
                width: 0,
                height: 20
            })
        );
        assert!(Board::new(10, 0).is_err());
        assert!(Board::new(1, 1).is_ok());
    }

    #[test]
    fn test_is_empty_above_top_but_not_below_floor() {
        let board = Board::standard();
        assert!(board.is_empty(0, -3));
        assert!(!board.is_empty(-1, -3));
        assert!(!board.is_empty(10, -1));
        assert!(!board.is_empty(0, 20));
    }

    #[test]
    fn test_clear_keeps_non_full_rows_in_order() {
        let mut board = Board::new(3, 4).unwrap();
        let a = Some(Rgb::RED);
        let b = Some(Rgb::BLUE);

        // row 0: empty, row 1: full, row 2: partial, row 3: full
        for x in 0..3 {
            board.set(x, 1, a);
            board.set(x, 3, a);
        }
        board.set(1, 2, b);

        assert_eq!(board.clear_full_lines(), 2);
        assert!(board.row(0).iter().all(|c| c.is_none()));
        assert!(board.row(1).iter().all(|c| c.is_none()));
        assert!(board.row(2).iter().all(|c| c.is_none()));
        assert_eq!(board.row(3), &[None, b, None]);
    }

    #[test]
    fn test_freeze_skips_cells_outside_grid() {
        let mut board = Board::standard();
        let mut piece = crate::pieces::Piece::spawn(get_shape(PieceKind::O), 10);
        piece.y = -1;
        board.freeze(&piece);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(4, 0), Some(Some(Rgb::YELLOW)));
    }
}
