use crate::board::Grid;
use crate::piece::{ActivePiece, NextPiece};
use crate::pieces::Shape;
use crate::scoring::fall_period;
use crate::types::{Cell, PieceKind, Status, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i8,
    pub col: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            row: value.row,
            col: value.col,
        }
    }
}

/// Everything a shell needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub status: Status,
    pub board: Grid,
    pub active: Option<ActiveSnapshot>,
    pub next: NextPiece,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub fall_period: u32,
}

impl GameSnapshot {
    /// Cell to draw at `(row, col)` with the active piece overlaid
    pub fn cell_with_active(&self, row: usize, col: usize) -> Cell {
        if let Some(active) = self.active {
            let r = row as i16 - active.row as i16;
            let c = col as i16 - active.col as i16;
            if r >= 0 && c >= 0 && active.shape.is_set(r as usize, c as usize) {
                return Cell::Block(active.kind);
            }
        }
        self.board
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(Cell::Wall)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            status: Status::GameOver,
            board: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: NextPiece::new(PieceKind::I, 0),
            score: 0,
            lines: 0,
            level: 1,
            fall_period: fall_period(1),
        }
    }
}
