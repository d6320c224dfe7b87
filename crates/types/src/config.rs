//! Board configuration.
//!
//! Every knob the engine reads at initialization lives here. The structs are
//! serde-friendly with per-field defaults so a host can load a partial JSON
//! document and still get a playable board.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    GridPoint, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_COMBO_RATIO,
    DEFAULT_GAME_DURATION_MS, DEFAULT_TILE_RATIO, DEFAULT_TILE_TYPES, DESTROY_GROW_MS,
    DESTROY_SHRINK_MS, MAX_TILE_TYPES, MOVE_DURATION_MS,
};

/// Fatal configuration problems. The engine refuses to start on any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board width must be at least 1")]
    ZeroWidth,
    #[error("board height must be at least 1")]
    ZeroHeight,
    #[error("at least one tile type is required")]
    NoTileTypes,
    #[error("{requested} tile types requested, at most {max} are supported")]
    TooManyTileTypes { requested: u8, max: usize },
    #[error("expected {expected_rows} rows of {expected_width} cells, row {row} has {found}")]
    RowShape {
        expected_rows: usize,
        expected_width: usize,
        row: usize,
        found: usize,
    },
    #[error("tile id {id} at ({x}, {y}) is outside 0..{tile_types}")]
    TileIdOutOfRange { id: i16, x: u8, y: u8, tile_types: u8 },
}

/// How refilled tiles pick their id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefillPolicy {
    /// Uniform over all tile types; refills may create new matches.
    #[default]
    Uniform,
    /// Apply the same left/below exclusion used when populating the board.
    AvoidMatches,
}

/// Physical placement of cells, used only to hand world coordinates to the mover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLayout {
    pub tile_size: [f32; 2],
    /// Gap between neighbouring tiles, per axis
    pub spacing: [f32; 2],
    /// Offset of the board centre
    pub offset: [f32; 2],
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            tile_size: [1.0, 1.0],
            spacing: [0.1, 0.1],
            offset: [0.0, 0.0],
        }
    }
}

impl BoardLayout {
    fn pitch(&self) -> [f32; 2] {
        [
            self.tile_size[0] + self.spacing[0],
            self.tile_size[1] + self.spacing[1],
        ]
    }

    /// World position of the bottom-left cell, with the board centred on `offset`.
    pub fn origin(&self, width: u8, height: u8) -> [f32; 2] {
        let pitch = self.pitch();
        let total_w = pitch[0] * (width as f32 - 1.0);
        let total_h = pitch[1] * (height as f32 - 1.0);
        [
            self.offset[0] - total_w / 2.0,
            self.offset[1] - total_h / 2.0,
        ]
    }

    /// World position of a grid point (may be outside the board).
    pub fn world_position(&self, point: GridPoint, width: u8, height: u8) -> [f32; 2] {
        let origin = self.origin(width, height);
        let pitch = self.pitch();
        [
            origin[0] + pitch[0] * point.x as f32,
            origin[1] + pitch[1] * point.y as f32,
        ]
    }
}

/// Animation durations handed to the mover, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub move_ms: u32,
    pub destroy_grow_ms: u32,
    pub destroy_shrink_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            move_ms: MOVE_DURATION_MS,
            destroy_grow_ms: DESTROY_GROW_MS,
            destroy_shrink_ms: DESTROY_SHRINK_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRatios {
    pub tile_ratio: u32,
    pub combo_ratio: u32,
}

impl Default for ScoreRatios {
    fn default() -> Self {
        Self {
            tile_ratio: DEFAULT_TILE_RATIO,
            combo_ratio: DEFAULT_COMBO_RATIO,
        }
    }
}

/// Complete board configuration.
///
/// # Examples
///
/// ```
/// use match_three_types::{BoardConfig, ConfigError};
///
/// assert!(BoardConfig::default().validate().is_ok());
///
/// let cfg = BoardConfig { tile_types: 0, ..BoardConfig::default() };
/// assert_eq!(cfg.validate(), Err(ConfigError::NoTileTypes));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: u8,
    pub height: u8,
    pub tile_types: u8,
    pub layout: BoardLayout,
    pub timing: Timing,
    pub score: ScoreRatios,
    pub refill: RefillPolicy,
    /// `None` disables the session timer.
    pub game_duration_ms: Option<u32>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            tile_types: DEFAULT_TILE_TYPES,
            layout: BoardLayout::default(),
            timing: Timing::default(),
            score: ScoreRatios::default(),
            refill: RefillPolicy::default(),
            game_duration_ms: Some(DEFAULT_GAME_DURATION_MS),
        }
    }
}

impl BoardConfig {
    /// Convenience constructor for the common "just dimensions" case.
    pub fn with_size(width: u8, height: u8, tile_types: u8) -> Self {
        Self {
            width,
            height,
            tile_types,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.tile_types == 0 {
            return Err(ConfigError::NoTileTypes);
        }
        if self.tile_types as usize > MAX_TILE_TYPES {
            return Err(ConfigError::TooManyTileTypes {
                requested: self.tile_types,
                max: MAX_TILE_TYPES,
            });
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
