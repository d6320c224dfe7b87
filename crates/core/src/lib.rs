//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-three resolution engine: tile storage, match
//! detection, gravity, refill and the cascade state machine that sequences
//! them. It has **no dependencies** on terminals or input devices; animation,
//! randomness and scoring reach it through small injected traits.
//!
//! # Module Structure
//!
//! - [`tile`]: the atomic cell, recycled in place for the lifetime of a board
//! - [`grid`]: flat `width x height` storage, row 0 at the bottom
//! - [`generator`]: random ids that avoid an immediate run of three
//! - [`matcher`]: finds every tile in a straight run of three or more
//! - [`gravity`]: per-column fall distances and their application
//! - [`board`]: the cascade state machine and its driver API
//! - [`mover`] / [`barrier`]: the animation boundary and the join over tasks
//! - [`scoring`]: score deltas, running totals and the high score
//! - [`game`]: a timed session wiring everything together
//!
//! # Example
//!
//! ```
//! use match_three_core::types::{BoardConfig, CellIndex};
//! use match_three_core::Game;
//!
//! let config = BoardConfig {
//!     game_duration_ms: None,
//!     ..BoardConfig::with_size(6, 6, 5)
//! };
//! let mut game = Game::new(config, 12345).unwrap();
//!
//! // A swap is either rejected outright or animates (and maybe reverts).
//! let _ = game.request_swap(CellIndex::new(0, 0), CellIndex::new(1, 0));
//! for _ in 0..10_000 {
//!     if game.board().accepts_input() {
//!         break;
//!     }
//!     game.tick(16);
//! }
//! assert!(game.board().accepts_input());
//! ```
//!
//! # Timing
//!
//! Drivers call [`Game::tick`] with the elapsed time (16ms per frame in the
//! terminal client). Each tick advances the tweens, forwards finished tasks to
//! the board and lets the board run every phase whose barrier is satisfied.

pub mod barrier;
pub mod board;
pub mod game;
pub mod generator;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod mover;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tile;

pub use match_three_types as types;

// Re-export commonly used types for convenience
pub use barrier::Barrier;
pub use board::{Board, BoardEvent, Collaborators, Phase, SwapRejected};
pub use game::{Game, GameClock};
pub use generator::TileGenerator;
pub use gravity::{compute_drops, DropTable};
pub use grid::Grid;
pub use matcher::{find_all_matches, has_match, MatchSet};
pub use mover::{Mover, TaskId, TweenMover};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{ScoreAccumulator, ScoreBoard, ScoreSink};
pub use snapshot::{GameSnapshot, TileMotion};
pub use tile::{Tile, TileKey};
