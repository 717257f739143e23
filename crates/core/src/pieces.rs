//! Pieces module - the tetromino catalog
//!
//! Each piece is a square bitmask of minimal bounding size: 4x4 for I, 3x3 for
//! L/J/S/Z/T and 2x2 for O. Rotations are derived on demand by turning the
//! square matrix; no pre-rotated variants are stored.
//!
//! Coordinates inside a shape are `(row, col)` with row 0 at the top.

use crate::types::{PieceKind, BOARD_WIDTH, MAX_SHAPE_SIZE};

/// Occupancy matrix of a shape, always 4x4 with only the top-left
/// `size x size` corner in use
pub type ShapeGrid = [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

/// A tetromino shape in one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    grid: ShapeGrid,
}

impl Shape {
    fn from_minos(size: u8, minos: [(usize, usize); 4]) -> Self {
        let mut grid = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, col) in minos {
            grid[row][col] = true;
        }
        Self { size, grid }
    }

    /// Side length of the bounding square
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether `(row, col)` inside the bounding square is filled
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        row < self.size as usize && col < self.size as usize && self.grid[row][col]
    }

    /// Occupied `(row, col)` offsets, top to bottom, left to right
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let grid = self.grid;
        let n = self.size as usize;
        (0..n).flat_map(move |r| {
            (0..n).filter_map(move |c| grid[r][c].then_some((r as i8, c as i8)))
        })
    }

    /// Rotate by `steps` quarter turns; positive is counter-clockwise.
    ///
    /// Any integer is accepted: `-1` and `3` are the same clockwise turn.
    pub fn rotated(&self, steps: i8) -> Self {
        let mut out = *self;
        for _ in 0..steps.rem_euclid(4) {
            out = out.rotate_ccw();
        }
        out
    }

    fn rotate_ccw(&self) -> Self {
        let n = self.size as usize;
        let mut grid = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in grid.iter_mut().enumerate().take(n) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.grid[j][n - 1 - i];
            }
        }
        Self {
            size: self.size,
            grid,
        }
    }
}

/// Get the catalog shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        // Vertical bar in column 1.
        PieceKind::I => Shape::from_minos(4, [(0, 1), (1, 1), (2, 1), (3, 1)]),
        PieceKind::L => Shape::from_minos(3, [(0, 2), (1, 0), (1, 1), (1, 2)]),
        PieceKind::J => Shape::from_minos(3, [(0, 0), (1, 0), (1, 1), (1, 2)]),
        PieceKind::S => Shape::from_minos(3, [(0, 1), (0, 2), (1, 0), (1, 1)]),
        PieceKind::Z => Shape::from_minos(3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
        PieceKind::T => Shape::from_minos(3, [(0, 1), (1, 0), (1, 1), (1, 2)]),
        PieceKind::O => Shape::from_minos(2, [(0, 0), (0, 1), (1, 0), (1, 1)]),
    }
}

/// Spawn row for every new piece
pub const SPAWN_ROW: i8 = 0;

/// Column that horizontally centers a shape of the given size
pub fn spawn_col(size: u8) -> i8 {
    (BOARD_WIDTH as i8 - size as i8) / 2
}
