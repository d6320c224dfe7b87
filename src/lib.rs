//! Match-three (workspace facade crate).
//!
//! Re-exports the member crates as `match_three::{core, input, term, types}`
//! and hosts the command-line plumbing of the `match-three` binary.

pub mod cli;

pub use match_three_core as core;
pub use match_three_input as input;
pub use match_three_term as term;
pub use match_three_types as types;
