//! Constrained random tile ids.
//!
//! When the board is populated, each cell picks a uniform id from the tile
//! types that would not complete a run of three with the two cells to its
//! left or the two cells below it. Cells are filled column by column, bottom
//! to top, so those four neighbours are always decided already.

use arrayvec::ArrayVec;

use crate::rng::RandomSource;
use crate::types::{TileId, MAX_TILE_TYPES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGenerator {
    tile_types: u8,
}

impl TileGenerator {
    /// `tile_types` must already be validated (`1..=MAX_TILE_TYPES`).
    pub fn new(tile_types: u8) -> Self {
        debug_assert!(tile_types >= 1 && tile_types as usize <= MAX_TILE_TYPES);
        Self { tile_types }
    }

    pub fn tile_types(&self) -> u8 {
        self.tile_types
    }

    /// Any id, uniformly.
    pub fn uniform_id(&self, random: &mut dyn RandomSource) -> TileId {
        random.next_below(self.tile_types as u32) as TileId
    }

    /// A uniform id for `(x, y)` that avoids an immediate horizontal or
    /// vertical run of three.
    ///
    /// `id_at` reports the live id of a neighbouring cell, or `None` when
    /// the cell is off the board, not generated yet, or destroyed.
    ///
    /// With two tile types and both neighbour pairs excluding different ids
    /// no candidate is left; the id excluded by the vertical pair is then
    /// forced (same with one tile type and any exclusion).
    pub fn pick_id(
        &self,
        random: &mut dyn RandomSource,
        x: u8,
        y: u8,
        id_at: impl Fn(i16, i16) -> Option<TileId>,
    ) -> TileId {
        let mut candidates: ArrayVec<TileId, MAX_TILE_TYPES> =
            (0..self.tile_types as TileId).collect();

        let (x, y) = (x as i16, y as i16);
        let left = pair_id(id_at(x - 1, y), id_at(x - 2, y));
        let below = pair_id(id_at(x, y - 1), id_at(x, y - 2));

        let mut forced = None;
        for excluded in [left, below].into_iter().flatten() {
            candidates.retain(|id| *id != excluded);
            forced = Some(excluded);
        }

        if candidates.is_empty() {
            return forced.unwrap_or(0);
        }
        let pick = random.next_below(candidates.len() as u32) as usize;
        candidates[pick]
    }
}

/// The shared id of two neighbours, if both exist and agree.
fn pair_id(near: Option<TileId>, far: Option<TileId>) -> Option<TileId> {
    match (near, far) {
        (Some(a), Some(b)) if a == b => Some(a),
        _ => None,
    }
}
