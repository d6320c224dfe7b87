use crate::board::Phase;
use crate::types::{CellIndex, TileId, DESTROYED_ID};

/// What the animation layer is doing with the tile in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileMotion {
    #[default]
    Still,
    /// Sliding toward its cell
    Sliding,
    /// Destroy animation, at or above full size
    Popping,
    /// Destroy animation, shrinking away
    Vanishing,
}

/// Plain-data view of a game for renderers and observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major, bottom row first. Destroyed cells hold [`DESTROYED_ID`].
    pub ids: Vec<TileId>,
    /// Same layout as `ids`. May be empty (everything still).
    pub motion: Vec<TileMotion>,
    pub phase: Phase,
    pub animating: bool,
    pub combo: u32,
    pub score: u64,
    pub highscore: u64,
    /// `None` for untimed sessions.
    pub remaining_ms: Option<u32>,
    pub game_over: bool,
    pub episode_id: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            ids: Vec::new(),
            motion: Vec::new(),
            phase: Phase::Idle,
            animating: false,
            combo: 0,
            score: 0,
            highscore: 0,
            remaining_ms: None,
            game_over: false,
            episode_id: 0,
        }
    }
}

impl GameSnapshot {
    pub fn id_at(&self, cell: CellIndex) -> TileId {
        if cell.x >= self.width || cell.y >= self.height {
            return DESTROYED_ID;
        }
        self.ids[cell.y as usize * self.width as usize + cell.x as usize]
    }

    pub fn motion_at(&self, cell: CellIndex) -> TileMotion {
        if cell.x >= self.width || cell.y >= self.height {
            return TileMotion::Still;
        }
        let i = cell.y as usize * self.width as usize + cell.x as usize;
        self.motion.get(i).copied().unwrap_or_default()
    }

    /// The player can select and swap right now.
    pub fn playable(&self) -> bool {
        !self.game_over && self.phase == Phase::Idle
    }
}
