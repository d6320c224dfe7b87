//! Terminal input module (engine-facing).
//!
//! This crate is the input boundary of the match-three engine. It maps
//! `crossterm` key events into [`crate::types::BoardAction`] and keeps the
//! player's cursor and current selection, turning clicks into swap requests
//! for the core. The selected cell lives here, never inside the board.

pub mod map;
pub mod selection;

pub use match_three_types as types;

pub use map::{handle_key_event, should_quit};
pub use selection::{SelectionHandler, SelectionOutcome};
