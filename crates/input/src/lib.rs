//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. There is no
//! auto-repeat: one key press is one command, and terminals that report key
//! releases or repeats have those filtered out.

pub mod map;

pub use stacktris_types as types;

pub use map::{handle_key_event, should_quit};
