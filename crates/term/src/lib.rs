//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the match-three board. It
//! avoids widget/layout frameworks and renders into a plain framebuffer that
//! is diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw the board with row 0 at the bottom, as the engine sees it
//! - Allow precise control over aspect ratio (3 columns per board cell)

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use match_three_core as core;
pub use match_three_types as types;

pub use board_view::{BoardView, Marks, Viewport};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{encode_frame, TerminalRenderer};
