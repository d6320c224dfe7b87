//! Tile module - the atomic grid cell
//!
//! A tile is created once per cell when the board is built and is never
//! removed. Swaps and drops relocate the same instance to new grid indices;
//! clearing only flips it to the destroyed state and refilling revives it in
//! place with a fresh id.

use crate::types::{CellIndex, GridPoint, TileId, DESTROYED_ID};

/// Stable identity of a tile for the lifetime of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey(pub(crate) u16);

impl TileKey {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    key: TileKey,
    id: TileId,
    destroyed: bool,
    /// Logical position (always equals the tile's slot in the grid)
    cell: CellIndex,
    /// Where the tile was last sent on screen, in grid units
    rest: GridPoint,
}

impl Tile {
    pub(crate) fn new(key: TileKey, id: TileId, cell: CellIndex) -> Self {
        Self {
            key,
            id,
            destroyed: id == DESTROYED_ID,
            cell,
            rest: cell.point(),
        }
    }

    pub fn key(&self) -> TileKey {
        self.key
    }

    /// Tile type, or [`DESTROYED_ID`] while cleared.
    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn cell(&self) -> CellIndex {
        self.cell
    }

    /// Last position handed to the mover (or the spawn point after a refill).
    pub fn rest(&self) -> GridPoint {
        self.rest
    }

    /// Whether two tiles continue a run: same id and neither destroyed.
    pub fn matches(&self, other: &Tile) -> bool {
        !self.destroyed && !other.destroyed && self.id == other.id
    }

    /// Assign type and logical position. The caller validates `id`.
    pub(crate) fn set_id(&mut self, id: TileId, x: u8, y: u8) {
        self.id = id;
        self.cell = CellIndex::new(x, y);
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.id = DESTROYED_ID;
        self.destroyed = true;
    }

    /// Bring a destroyed tile back with a new id, parked at `spawn` so the
    /// mover slides it into `cell`.
    pub(crate) fn revive(&mut self, id: TileId, cell: CellIndex, spawn: GridPoint) {
        self.set_id(id, cell.x, cell.y);
        self.destroyed = false;
        self.rest = spawn;
    }

    pub(crate) fn set_rest(&mut self, point: GridPoint) {
        self.rest = point;
    }
}
