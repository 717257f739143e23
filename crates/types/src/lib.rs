//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the engine, the input mapper and
//! the terminal view. Everything here is plain data with no dependencies.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 18 rows (indexed 0-17, top to bottom)
//! - **Fence margin**: 4 permanently occupied cells on every side of the playfield
//!
//! # Pacing
//!
//! The engine counts ticks, not milliseconds. A shell calls `tick()` every
//! [`DEFAULT_TICK_MS`] and the engine advances the falling piece once every
//! `fall_period` ticks:
//!
//! | Level | Fall period (ticks) |
//! |-------|---------------------|
//! | 1 | 25 |
//! | 2 | 23 |
//! | 5 | 17 |
//! | 10 | 7 |
//! | 13+ | 1 |
//!
//! # Examples
//!
//! ```
//! use stacktris_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.index(), 5);
//! assert_eq!(PieceKind::T.as_str(), "t");
//! assert_eq!(Command::HardDrop.as_str(), "hardDrop");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 18);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (18 rows)
pub const BOARD_HEIGHT: u8 = 18;

/// Width of the permanently occupied fence around the playfield
pub const FENCE_MARGIN: u8 = 4;

/// Side length of the largest tetromino bounding box (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Engine tick interval the shell is expected to honour (milliseconds)
pub const DEFAULT_TICK_MS: u32 = 40;

/// Points for a piece landing on the stack
pub const LANDING_SCORE: u32 = 25;

/// Points for clearing N rows at once (index = N)
pub const LINE_SCORES: [u32; 5] = [0, 100, 200, 400, 800];

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Fall period at level 0, before the per-level reduction is applied
pub const BASE_FALL_PERIOD: u32 = 27;

/// Ticks removed from the fall period per level
pub const FALL_PERIOD_STEP: u32 = 2;

/// Fastest possible fall period
pub const MIN_FALL_PERIOD: u32 = 1;

/// The seven tetromino piece kinds
///
/// Declaration order is the identity (color) index used on the board:
/// - **I** (0): straight bar
/// - **L** (1): bar with the right end raised
/// - **J** (2): mirror of L
/// - **S** (3): S-shaped
/// - **Z** (4): mirror of S
/// - **T** (5): T-shaped
/// - **O** (6): 2x2 square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    L,
    J,
    S,
    Z,
    T,
    O,
}

impl PieceKind {
    /// All piece kinds in identity order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::O,
    ];

    /// Identity index (0-6)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Piece kind for an identity index, `None` past 6
    ///
    /// # Examples
    ///
    /// ```
    /// use stacktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(0), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(6), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Lowercase letter, as written to the log
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::O => "o",
        }
    }
}

/// A cell of the board buffer
///
/// Anything other than `Empty` counts as occupied for collision and row-fill
/// purposes. `Wall` only ever appears in the fence around the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Block(PieceKind),
    /// A block in a row that is about to be cleared
    Flash,
}

impl Cell {
    pub fn is_occupied(self) -> bool {
        !matches!(self, Cell::Empty)
    }
}

/// Game progression state
///
/// Exactly one is active at a time. `GameOver` is both the initial and the
/// terminal state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    GameOver,
    Descending,
    SpawningNext,
    ClearingLines,
    Paused,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::GameOver => "gameOver",
            Status::Descending => "descending",
            Status::SpawningNext => "spawningNext",
            Status::ClearingLines => "clearingLines",
            Status::Paused => "paused",
        }
    }
}

/// Discrete player commands
///
/// The shell decodes raw input into these; the engine decides whether each one
/// is legal in the current [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a new session (only from game over)
    Start,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop piece to the lowest legal row and land it
    HardDrop,
    /// Enter or leave the paused state
    TogglePause,
}

impl Command {
    /// camelCase name, as written to the log
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
        }
    }
}
