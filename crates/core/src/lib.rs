//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and the state machine that runs a
//! session. It has no dependency on terminals or timers: the shell calls
//! [`GameState::tick`] on a fixed cadence and feeds it [`Command`]s.
//!
//! - **Deterministic**: the same randomizer seed and the same input sequence
//!   produce the same game
//! - **Headless**: every frame can be read back as a [`GameSnapshot`]
//! - **Allocation-free hot path**: ticks and commands only touch fixed buffers
//!
//! # Module Structure
//!
//! - [`board`]: 10x18 playfield inside a fenced buffer, collision and collapse
//! - [`pieces`]: the seven shapes and quarter-turn rotation
//! - [`piece`]: the falling piece and the previewed next piece
//! - [`rng`]: the [`Randomizer`] seam and a seeded generator
//! - [`scoring`]: landing and line clear points, level, fall pacing
//! - [`game_state`]: the session state machine
//! - [`snapshot`]: read-only frame state for renderers
//!
//! # Example
//!
//! ```
//! use stacktris_core::{GameSettings, GameState, SimpleRng};
//! use stacktris_core::types::Status;
//!
//! let mut game = GameState::new(SimpleRng::new(12345), GameSettings::default());
//! game.start().unwrap();
//! assert_eq!(game.status(), Status::Descending);
//!
//! game.hard_drop().unwrap();
//! assert_eq!(game.score().score(), 25);
//! ```
//!
//! # Timing
//!
//! One call to [`GameState::tick`] is one engine frame (40ms by default). A
//! falling piece moves down, and flashing rows are removed, once every
//! `fall_period` frames: 25 at level 1, two fewer per level, never below 1.

pub mod board;
pub mod error;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use stacktris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, FullRows, Grid};
pub use error::GameError;
pub use game_state::{GameSettings, GameState, Outcome};
pub use piece::{ActivePiece, Move, NextPiece};
pub use pieces::{get_shape, Shape};
pub use rng::{Randomizer, Sequence, SimpleRng};
pub use scoring::{calculate_level, fall_period, line_clear_score, ScoreEvent, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use types::Command;
