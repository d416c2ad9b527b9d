//! Pieces module - shape catalog, occupancy matrices and clockwise rotation
//!
//! Every shape is a small rectangular occupancy matrix (at most 4x4) stored as a
//! row-major bitmask. Rotation builds a new matrix with transposed dimensions, so the
//! catalog entries are never touched.

use crate::types::{PieceKind, Rgb, MAX_SHAPE_SIDE};

/// Rectangular occupancy matrix of a piece's bounding box
///
/// Cell (row, col) is filled when bit `row * cols + col` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupancy {
    rows: u8,
    cols: u8,
    bits: u16,
}

impl Occupancy {
    /// Build a matrix from rows of 0/1 values.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty or larger than 4x4. Inside a `const` item this is a
    /// compile error rather than a runtime panic.
    pub const fn from_matrix<const R: usize, const C: usize>(m: [[u8; C]; R]) -> Self {
        assert!(R > 0 && C > 0 && R <= MAX_SHAPE_SIDE && C <= MAX_SHAPE_SIDE);

        let mut bits = 0u16;
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                if m[r][c] != 0 {
                    bits |= 1u16 << (r * C + c);
                }
                c += 1;
            }
            r += 1;
        }

        Self {
            rows: R as u8,
            cols: C as u8,
            bits,
        }
    }

    /// Number of rows (bounding box height)
    pub fn height(&self) -> u8 {
        self.rows
    }

    /// Number of columns (bounding box width)
    pub fn width(&self) -> u8 {
        self.cols
    }

    /// Check whether cell (row, col) is filled; out-of-range cells are empty
    pub fn get(&self, row: u8, col: u8) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        let bit = (row as usize) * (self.cols as usize) + (col as usize);
        self.bits & (1u16 << bit) != 0
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Iterate filled cells as (row, col), row-major
    pub fn filled(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.get(r, c))
                .map(move |c| (r, c))
        })
    }

    /// Rotate 90° clockwise
    ///
    /// The result has transposed dimensions and `new(r, c) = old(rows - 1 - c, r)`.
    pub fn rotated_cw(&self) -> Self {
        let new_rows = self.cols;
        let new_cols = self.rows;

        let mut bits = 0u16;
        for r in 0..new_rows {
            for c in 0..new_cols {
                if self.get(self.rows - 1 - c, r) {
                    bits |= 1u16 << ((r as usize) * (new_cols as usize) + (c as usize));
                }
            }
        }

        Self {
            rows: new_rows,
            cols: new_cols,
            bits,
        }
    }
}

/// One catalog entry: a piece kind, its spawn matrix and its display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub kind: PieceKind,
    pub occupancy: Occupancy,
    pub color: Rgb,
}

static CATALOG: [ShapeDefinition; 7] = [
    ShapeDefinition {
        kind: PieceKind::I,
        occupancy: Occupancy::from_matrix([[1, 1, 1, 1]]),
        color: Rgb::CYAN,
    },
    ShapeDefinition {
        kind: PieceKind::O,
        occupancy: Occupancy::from_matrix([[1, 1], [1, 1]]),
        color: Rgb::YELLOW,
    },
    ShapeDefinition {
        kind: PieceKind::T,
        occupancy: Occupancy::from_matrix([[0, 1, 0], [1, 1, 1]]),
        color: Rgb::MAGENTA,
    },
    ShapeDefinition {
        kind: PieceKind::L,
        occupancy: Occupancy::from_matrix([[1, 0, 0], [1, 1, 1]]),
        color: Rgb::ORANGE,
    },
    ShapeDefinition {
        kind: PieceKind::J,
        occupancy: Occupancy::from_matrix([[0, 0, 1], [1, 1, 1]]),
        color: Rgb::BLUE,
    },
    ShapeDefinition {
        kind: PieceKind::S,
        occupancy: Occupancy::from_matrix([[1, 1, 0], [0, 1, 1]]),
        color: Rgb::GREEN,
    },
    ShapeDefinition {
        kind: PieceKind::Z,
        occupancy: Occupancy::from_matrix([[0, 1, 1], [1, 1, 0]]),
        color: Rgb::RED,
    },
];

/// The fixed, ordered shape catalog (I, O, T, L, J, S, Z)
pub fn catalog() -> &'static [ShapeDefinition; 7] {
    &CATALOG
}

/// Look up the catalog entry for a piece kind
pub fn get_shape(kind: PieceKind) -> &'static ShapeDefinition {
    &CATALOG[kind.index()]
}

/// A positioned, rotatable instance of a catalog shape
///
/// `(x, y)` is the board position of the matrix's top-left cell. `y` may be negative
/// while a piece pokes out above the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub occupancy: Occupancy,
    pub color: Rgb,
    pub x: i16,
    pub y: i16,
}

impl Piece {
    /// Create a piece at the top of a board, horizontally centered
    ///
    /// No collision check is made here; the caller decides whether the spawn is legal.
    pub fn spawn(shape: &ShapeDefinition, board_width: u8) -> Self {
        let x = (board_width / 2) as i16 - (shape.occupancy.width() / 2) as i16;
        Self {
            kind: shape.kind,
            occupancy: shape.occupancy,
            color: shape.color,
            x,
            y: 0,
        }
    }

    /// Same piece with its matrix rotated 90° clockwise; position and color unchanged
    pub fn rotate_clockwise(&self) -> Self {
        Self {
            occupancy: self.occupancy.rotated_cw(),
            ..*self
        }
    }

    /// Board coordinates (x, y) of every filled cell
    pub fn filled_cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.occupancy
            .filled()
            .map(move |(r, c)| (self.x + c as i16, self.y + r as i16))
    }
}
