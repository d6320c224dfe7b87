//! Core types module - shared data structures and constants
//!
//! This crate defines the vocabulary shared by the resolution engine, the input
//! collaborator and the terminal renderer. Everything here is plain data: no
//! I/O and no randomness.
//!
//! # Grid coordinates
//!
//! Cells are addressed as `(x, y)` with `x` growing to the right and `y`
//! growing **upwards**: row `0` is the bottom row, row `height - 1` is the top.
//! Gravity pulls tiles towards row `0` and refilled tiles enter from above the
//! top row.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DEFAULT_BOARD_WIDTH` | 8 | Columns |
//! | `DEFAULT_BOARD_HEIGHT` | 8 | Rows |
//! | `DEFAULT_TILE_TYPES` | 5 | Distinct tile ids |
//! | `MOVE_DURATION_MS` | 500 | Swap / drop / refill slide |
//! | `DESTROY_GROW_MS` | 100 | Destroy animation, grow step |
//! | `DESTROY_SHRINK_MS` | 400 | Destroy animation, shrink step |
//! | `DEFAULT_GAME_DURATION_MS` | 60000 | Timed session length |
//!
//! # Examples
//!
//! ```
//! use match_three_types::{BoardAction, CellIndex, Direction};
//!
//! let a = CellIndex::new(2, 3);
//! assert!(a.is_adjacent(CellIndex::new(2, 4)));
//! assert!(!a.is_adjacent(CellIndex::new(3, 4)));
//!
//! assert_eq!(a.step(Direction::Up, 8, 8), Some(CellIndex::new(2, 4)));
//! assert_eq!(CellIndex::new(0, 0).step(Direction::Left, 8, 8), None);
//!
//! assert_eq!(BoardAction::CursorUp.direction(), Some(Direction::Up));
//! assert_eq!(BoardAction::Select.direction(), None);
//! ```

pub mod config;

pub use config::{BoardConfig, BoardLayout, ConfigError, RefillPolicy, ScoreRatios, Timing};

use serde::{Deserialize, Serialize};

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: u8 = 8;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: u8 = 8;

/// Default number of distinct tile ids
pub const DEFAULT_TILE_TYPES: u8 = 5;

/// Upper bound on tile types (keeps candidate lists on the stack)
pub const MAX_TILE_TYPES: usize = 16;

/// Shortest run that counts as a match
pub const MIN_RUN: usize = 3;

/// Id carried by a tile between being cleared and being refilled
pub const DESTROYED_ID: TileId = -1;

/// Duration of a position animation (swap, drop, refill)
pub const MOVE_DURATION_MS: u32 = 500;

/// Destroy animation: scale up to 1.2x
pub const DESTROY_GROW_MS: u32 = 100;

/// Destroy animation: scale down to nothing
pub const DESTROY_SHRINK_MS: u32 = 400;

/// Points per matched tile
pub const DEFAULT_TILE_RATIO: u32 = 10;

/// Multiplier per combo step
pub const DEFAULT_COMBO_RATIO: u32 = 1;

/// Length of a timed session
pub const DEFAULT_GAME_DURATION_MS: u32 = 60_000;

/// Tile type id. Valid ids are `0..tile_types`; [`DESTROYED_ID`] marks a cleared tile.
pub type TileId = i16;

/// Logical address of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub x: u8,
    pub y: u8,
}

impl CellIndex {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Orthogonal neighbours only: `|dx| + |dy| == 1`.
    pub fn is_adjacent(self, other: CellIndex) -> bool {
        self.x.abs_diff(other.x) as u16 + self.y.abs_diff(other.y) as u16 == 1
    }

    /// The neighbouring cell in `dir`, or `None` when it falls off a
    /// `width` x `height` board.
    pub fn step(self, dir: Direction, width: u8, height: u8) -> Option<CellIndex> {
        let (dx, dy) = dir.delta();
        let x = self.x as i16 + dx as i16;
        let y = self.y as i16 + dy as i16;
        if x < 0 || y < 0 || x >= width as i16 || y >= height as i16 {
            return None;
        }
        Some(CellIndex::new(x as u8, y as u8))
    }

    pub fn point(self) -> GridPoint {
        GridPoint::new(self.x as i16, self.y as i16)
    }
}

/// A position in grid units that may lie outside the board (refilled tiles
/// start above the top row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i16,
    pub y: i16,
}

impl GridPoint {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl From<CellIndex> for GridPoint {
    fn from(value: CellIndex) -> Self {
        value.point()
    }
}

/// The four scan / cursor directions. `Up` is towards higher `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Player actions produced by the input layer.
///
/// The engine itself only understands swap requests; these actions drive the
/// selection handler that turns cursor clicks into swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    /// Click the cell under the cursor
    Select,
    /// Drop the current selection
    Cancel,
    /// Start a new session
    Restart,
}

impl BoardAction {
    /// Cursor direction for the four cursor actions.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            BoardAction::CursorLeft => Some(Direction::Left),
            BoardAction::CursorRight => Some(Direction::Right),
            BoardAction::CursorUp => Some(Direction::Up),
            BoardAction::CursorDown => Some(Direction::Down),
            _ => None,
        }
    }
}
