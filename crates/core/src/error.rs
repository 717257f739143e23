//! Typed failures for engine precondition violations.
//!
//! Rejected moves are not errors (they report `applied == false`); these are
//! raised only when a caller breaks an operation's contract.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// `fix` was asked to write a shape over an occupied cell
    Collision { row: i8, col: i8 },
    /// `collapse` got rows that are unsorted, repeated or outside the playfield
    InvalidRows,
    /// A line-clear event reported a row count outside 1..=4
    UnscorableClear { rows: usize },
    /// The machine is in a piece-bearing state without an active piece
    NoActivePiece,
}

impl GameError {
    pub fn code(self) -> &'static str {
        match self {
            GameError::Collision { .. } => "collision",
            GameError::InvalidRows => "invalid_rows",
            GameError::UnscorableClear { .. } => "unscorable_clear",
            GameError::NoActivePiece => "no_active",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            GameError::Collision { .. } => "piece fixed over an occupied cell",
            GameError::InvalidRows => "rows must be ascending, unique and inside the playfield",
            GameError::UnscorableClear { .. } => "line clear count must be between 1 and 4",
            GameError::NoActivePiece => "no active piece",
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GameError::Collision { row, col } => {
                write!(f, "{} at row {}, col {}", self.message(), row, col)
            }
            GameError::UnscorableClear { rows } => write!(f, "{} (got {})", self.message(), rows),
            _ => f.write_str(self.message()),
        }
    }
}

impl std::error::Error for GameError {}
