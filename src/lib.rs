//! Stacktris (workspace facade crate).
//!
//! Re-exports the member crates as `stacktris::{core, input, term, types}` and
//! hosts the shell-side configuration loader.

pub mod config;

pub use stacktris_core as core;
pub use stacktris_input as input;
pub use stacktris_term as term;
pub use stacktris_types as types;
