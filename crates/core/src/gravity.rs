//! Gravity - how far each surviving tile falls after a clear.
//!
//! For every destroyed cell in a column, each live tile above it falls one
//! more row. Destroyed tiles above a hole neither fall nor count. Applying the
//! table is a pure index exchange: a falling tile trades slots with the
//! destroyed tile currently occupying its landing cell, so after the drop
//! every column's destroyed tiles form one block under the top edge.

use crate::grid::Grid;
use crate::tile::TileKey;
use crate::types::CellIndex;

/// Surviving tiles and the number of rows each one falls. Tiles that stay put
/// are not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropTable {
    /// Column by column, bottom to top
    entries: Vec<(TileKey, u8)>,
}

impl DropTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fall distance for `key` (0 when the tile does not move).
    pub fn distance(&self, key: TileKey) -> u8 {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, d)| *d)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileKey, u8)> + '_ {
        self.entries.iter().copied()
    }
}

pub fn compute_drops(grid: &Grid) -> DropTable {
    let mut entries = Vec::new();
    for x in 0..grid.width() {
        let mut holes = 0u8;
        for y in 0..grid.height() {
            let tile = grid.tile_at(CellIndex::new(x, y));
            if tile.is_destroyed() {
                holes += 1;
            } else if holes > 0 {
                entries.push((tile.key(), holes));
            }
        }
    }
    DropTable { entries }
}

/// Apply a drop table computed on this grid. Returns `(from, to)` per moved tile.
pub(crate) fn apply_drops(grid: &mut Grid, table: &DropTable) -> Vec<(CellIndex, CellIndex)> {
    let mut moves = Vec::with_capacity(table.len());
    // Bottom-to-top order guarantees every landing cell holds a destroyed tile.
    for (key, distance) in table.iter() {
        let from = grid.tile(key).cell();
        let to = CellIndex::new(from.x, from.y - distance);
        debug_assert!(grid.tile_at(to).is_destroyed());
        grid.swap_cells(from, to);
        moves.push((from, to));
    }
    moves
}
