//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: [`GameView`] draws a snapshot into a
//! [`FrameBuffer`], and [`TerminalRenderer`] flushes framebuffers to the
//! terminal, sending only the cells that changed.
//!
//! Board cells are drawn two terminal columns wide to keep blocks square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use stacktris_core as core;
pub use stacktris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
