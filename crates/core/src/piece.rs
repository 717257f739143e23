//! Active and next piece.
//!
//! Every movement is a proposed delta `(rows, cols, rotation steps)` checked
//! with [`Board::is_collision`] and committed only when the result is free.
//! There are no wall kicks: a blocked rotation simply does not happen.

use crate::board::Board;
use crate::pieces::{get_shape, spawn_col, Shape, SPAWN_ROW};
use crate::types::PieceKind;

/// A proposed change to the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub rows: i8,
    pub cols: i8,
    /// Quarter turns, +1 counter-clockwise, -1 clockwise
    pub turns: i8,
}

impl Move {
    pub const LEFT: Move = Move::new(0, -1, 0);
    pub const RIGHT: Move = Move::new(0, 1, 0);
    pub const DOWN: Move = Move::new(1, 0, 0);
    pub const ROTATE_CCW: Move = Move::new(0, 0, 1);
    pub const ROTATE_CW: Move = Move::new(0, 0, -1);

    pub const fn new(rows: i8, cols: i8, turns: i8) -> Self {
        Self { rows, cols, turns }
    }
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl ActivePiece {
    /// Place a shape at the top of the board, horizontally centered
    pub fn spawn(kind: PieceKind, shape: Shape) -> Self {
        Self {
            kind,
            shape,
            row: SPAWN_ROW,
            col: spawn_col(shape.size()),
        }
    }

    /// The piece after `mv`, without checking the board
    pub fn moved(&self, mv: Move) -> Self {
        Self {
            shape: self.shape.rotated(mv.turns),
            row: self.row.saturating_add(mv.rows),
            col: self.col.saturating_add(mv.cols),
            ..*self
        }
    }

    /// Whether the piece overlaps anything where it currently stands
    pub fn collides(&self, board: &Board) -> bool {
        board.is_collision(&self.shape, self.row, self.col)
    }

    /// Apply `mv` if the result is collision-free. Returns whether it applied.
    pub fn try_move(&mut self, board: &Board, mv: Move) -> bool {
        let candidate = self.moved(mv);
        if candidate.collides(board) {
            return false;
        }
        *self = candidate;
        true
    }

    /// Rows the piece can fall before landing
    pub fn drop_distance(&self, board: &Board) -> i8 {
        let mut distance = 0;
        while !board.is_collision(&self.shape, self.row + distance + 1, self.col) {
            distance += 1;
        }
        distance
    }
}

/// The previewed piece, already in the orientation it will spawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextPiece {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl NextPiece {
    /// Catalog shape turned `turns` quarter turns counter-clockwise
    pub fn new(kind: PieceKind, turns: u8) -> Self {
        Self {
            kind,
            shape: get_shape(kind).rotated(turns as i8),
        }
    }

    pub fn into_active(self) -> ActivePiece {
        ActivePiece::spawn(self.kind, self.shape)
    }
}
