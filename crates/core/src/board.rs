//! Board module - manages the game grid
//!
//! The 18x10 playfield is embedded in a larger flat buffer whose outer margin is
//! permanently filled with [`Cell::Wall`]. Collision testing is therefore a single
//! overlay: a piece collides iff one of its cells lands on an occupied cell, and
//! anything outside the playfield is occupied by construction.
//!
//! Coordinates: `(row, col)` relative to the playfield, row 0 at the top, col 0
//! on the left. Negative or too-large values address the fence.

use arrayvec::ArrayVec;

use crate::error::GameError;
use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, FENCE_MARGIN};

const MARGIN: i16 = FENCE_MARGIN as i16;
const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;
const BUF_WIDTH: usize = WIDTH + 2 * FENCE_MARGIN as usize;
const BUF_HEIGHT: usize = HEIGHT + 2 * FENCE_MARGIN as usize;
const BUF_SIZE: usize = BUF_WIDTH * BUF_HEIGHT;

/// Row-major copy of the playfield (no fence)
pub type Grid = [[Cell; WIDTH]; HEIGHT];

/// Indices of full rows, top to bottom
pub type FullRows = ArrayVec<u8, HEIGHT>;

/// The game board - fenced flat buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order, fence included
    cells: [Cell; BUF_SIZE],
}

impl Board {
    /// Create a new board with an empty playfield
    pub fn new() -> Self {
        let mut board = Self {
            cells: [Cell::Wall; BUF_SIZE],
        };
        board.reset();
        board
    }

    /// Empty the playfield; the fence is left untouched
    pub fn reset(&mut self) {
        for row in 0..HEIGHT {
            let start = Self::row_start(row);
            self.cells[start..start + WIDTH].fill(Cell::Empty);
        }
    }

    /// Buffer index of the first playable cell of a playfield row
    #[inline(always)]
    fn row_start(row: usize) -> usize {
        (row + MARGIN as usize) * BUF_WIDTH + MARGIN as usize
    }

    /// Buffer index for playfield-relative coordinates, `None` past the margin
    #[inline(always)]
    fn index(row: i16, col: i16) -> Option<usize> {
        let r = row + MARGIN;
        let c = col + MARGIN;
        if r < 0 || r >= BUF_HEIGHT as i16 || c < 0 || c >= BUF_WIDTH as i16 {
            return None;
        }
        Some(r as usize * BUF_WIDTH + c as usize)
    }

    #[inline(always)]
    fn cell_at(&self, row: i16, col: i16) -> Cell {
        Self::index(row, col).map_or(Cell::Wall, |idx| self.cells[idx])
    }

    fn in_playfield(row: i16, col: i16) -> bool {
        (0..HEIGHT as i16).contains(&row) && (0..WIDTH as i16).contains(&col)
    }

    /// Cell at `(row, col)`; fence cells read as [`Cell::Wall`]
    pub fn get(&self, row: i8, col: i8) -> Cell {
        self.cell_at(row as i16, col as i16)
    }

    /// Set a playfield cell. Returns false (and writes nothing) outside the playfield.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        let (row, col) = (row as i16, col as i16);
        if !Self::in_playfield(row, col) {
            return false;
        }
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True iff some filled cell of `shape` placed at `(row, col)` lands on an
    /// occupied cell, the fence included
    pub fn is_collision(&self, shape: &Shape, row: i8, col: i8) -> bool {
        shape
            .cells()
            .any(|(dr, dc)| self.cell_at(row as i16 + dr as i16, col as i16 + dc as i16).is_occupied())
    }

    /// Write a piece into the board, tagging its cells with `kind`.
    ///
    /// The placement must be collision-free; otherwise nothing is written and
    /// the first offending cell is reported.
    pub fn fix(&mut self, shape: &Shape, kind: PieceKind, row: i8, col: i8) -> Result<(), GameError> {
        let (row, col) = (row as i16, col as i16);
        if let Some((dr, dc)) = shape
            .cells()
            .find(|&(dr, dc)| self.cell_at(row + dr as i16, col + dc as i16).is_occupied())
        {
            return Err(GameError::Collision {
                row: (row + dr as i16).clamp(i8::MIN as i16, i8::MAX as i16) as i8,
                col: (col + dc as i16).clamp(i8::MIN as i16, i8::MAX as i16) as i8,
            });
        }

        for (dr, dc) in shape.cells() {
            if let Some(idx) = Self::index(row + dr as i16, col + dc as i16) {
                self.cells[idx] = Cell::Block(kind);
            }
        }
        Ok(())
    }

    /// Write a piece regardless of what is underneath.
    ///
    /// Cells that fall on the fence are dropped so the margin stays intact.
    /// Only used when a spawn overflows the board and the session ends.
    pub fn stamp(&mut self, shape: &Shape, kind: PieceKind, row: i8, col: i8) {
        for (dr, dc) in shape.cells() {
            let (r, c) = (row as i16 + dr as i16, col as i16 + dc as i16);
            if Self::in_playfield(r, c) {
                if let Some(idx) = Self::index(r, c) {
                    self.cells[idx] = Cell::Block(kind);
                }
            }
        }
    }

    /// Check if a playfield row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        let start = Self::row_start(row);
        self.cells[start..start + WIDTH]
            .iter()
            .all(|cell| cell.is_occupied())
    }

    /// Every full playfield row, scanned top to bottom
    pub fn full_rows(&self) -> FullRows {
        (0..HEIGHT)
            .filter(|&row| self.is_row_full(row))
            .map(|row| row as u8)
            .collect()
    }

    /// Tag the occupied cells of `rows` with [`Cell::Flash`].
    ///
    /// Purely cosmetic: occupancy is unchanged. Rows outside the playfield are ignored.
    pub fn mark_flash(&mut self, rows: &[u8]) {
        for &row in rows {
            if row as usize >= HEIGHT {
                continue;
            }
            let start = Self::row_start(row as usize);
            for cell in &mut self.cells[start..start + WIDTH] {
                if cell.is_occupied() {
                    *cell = Cell::Flash;
                }
            }
        }
    }

    /// Remove `rows` and let everything above them fall.
    ///
    /// `rows` must be strictly ascending and inside the playfield. Each removal
    /// shifts only the rows above it, so processing in ascending order leaves the
    /// indices of the remaining rows valid.
    pub fn collapse(&mut self, rows: &[u8]) -> Result<(), GameError> {
        let ascending = rows.windows(2).all(|w| w[0] < w[1]);
        if !ascending || rows.iter().any(|&row| row as usize >= HEIGHT) {
            return Err(GameError::InvalidRows);
        }

        for &row in rows {
            // Whole buffer rows move; fence columns are identical in every row.
            for dst in (1..=row as usize).rev() {
                let src_start = (dst - 1 + MARGIN as usize) * BUF_WIDTH;
                let dst_start = (dst + MARGIN as usize) * BUF_WIDTH;
                self.cells
                    .copy_within(src_start..src_start + BUF_WIDTH, dst_start);
            }
            let top = Self::row_start(0);
            self.cells[top..top + WIDTH].fill(Cell::Empty);
        }
        Ok(())
    }

    /// Number of occupied playfield cells
    pub fn occupied_count(&self) -> usize {
        (0..HEIGHT)
            .map(|row| {
                let start = Self::row_start(row);
                self.cells[start..start + WIDTH]
                    .iter()
                    .filter(|cell| cell.is_occupied())
                    .count()
            })
            .sum()
    }

    /// True iff every cell outside the playfield is still a wall
    pub fn is_fence_intact(&self) -> bool {
        self.cells.iter().enumerate().all(|(idx, cell)| {
            let r = (idx / BUF_WIDTH) as i16 - MARGIN;
            let c = (idx % BUF_WIDTH) as i16 - MARGIN;
            Self::in_playfield(r, c) || *cell == Cell::Wall
        })
    }

    /// Copy the playfield into `out` (allocation-free)
    pub fn write_grid(&self, out: &mut Grid) {
        for (row, dst) in out.iter_mut().enumerate() {
            let start = Self::row_start(row);
            dst.copy_from_slice(&self.cells[start..start + WIDTH]);
        }
    }

    /// Copy of the playfield
    pub fn grid(&self) -> Grid {
        let mut out = [[Cell::Empty; WIDTH]; HEIGHT];
        self.write_grid(&mut out);
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
