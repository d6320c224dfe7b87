//! Grid module - cell-to-tile storage
//!
//! The grid is a `width x height` array of tile keys plus the arena of tiles
//! they point at. Uses flat arrays for cache locality.
//! Coordinates: (x, y) where x grows to the right and y grows upwards
//! (row 0 is the bottom of the board).
//!
//! Only the board mutates a grid; everything else reads it.

use crate::tile::{Tile, TileKey};
use crate::types::{CellIndex, TileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Tile arena, indexed by `TileKey`
    tiles: Vec<Tile>,
    /// Row-major slots (y * width + x) holding the key of the tile there
    cells: Vec<TileKey>,
}

impl Grid {
    /// Build a grid with one tile per cell, ids supplied row-major.
    pub(crate) fn from_ids(width: u8, height: u8, ids: &[TileId]) -> Self {
        let len = width as usize * height as usize;
        assert_eq!(ids.len(), len, "id buffer does not match grid size");

        let mut tiles = Vec::with_capacity(len);
        let mut cells = Vec::with_capacity(len);
        for (i, &id) in ids.iter().enumerate() {
            let cell = CellIndex::new((i % width as usize) as u8, (i / width as usize) as u8);
            let key = TileKey(i as u16);
            tiles.push(Tile::new(key, id, cell));
            cells.push(key);
        }
        Self {
            width,
            height,
            tiles,
            cells,
        }
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    #[inline(always)]
    fn slot(&self, cell: CellIndex) -> usize {
        match self.index(cell.x as i16, cell.y as i16) {
            Some(i) => i,
            None => panic!(
                "cell ({}, {}) outside {}x{} grid",
                cell.x, cell.y, self.width, self.height
            ),
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn contains(&self, cell: CellIndex) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Tile at (x, y), or `None` when out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[self.cells[i].index()])
    }

    /// Tile at `cell`. Panics when `cell` is outside the grid.
    pub fn tile_at(&self, cell: CellIndex) -> &Tile {
        &self.tiles[self.cells[self.slot(cell)].index()]
    }

    pub(crate) fn tile_at_mut(&mut self, cell: CellIndex) -> &mut Tile {
        let key = self.cells[self.slot(cell)];
        &mut self.tiles[key.index()]
    }

    pub fn key_at(&self, cell: CellIndex) -> TileKey {
        self.cells[self.slot(cell)]
    }

    pub fn tile(&self, key: TileKey) -> &Tile {
        &self.tiles[key.index()]
    }

    pub(crate) fn tile_mut(&mut self, key: TileKey) -> &mut Tile {
        &mut self.tiles[key.index()]
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Exchange the tiles in two cells and update both logical positions.
    pub(crate) fn swap_cells(&mut self, a: CellIndex, b: CellIndex) {
        let ia = self.slot(a);
        let ib = self.slot(b);
        self.cells.swap(ia, ib);

        let ka = self.cells[ia];
        let kb = self.cells[ib];
        let id_a = self.tiles[ka.index()].id();
        let id_b = self.tiles[kb.index()].id();
        self.tiles[ka.index()].set_id(id_a, a.x, a.y);
        self.tiles[kb.index()].set_id(id_b, b.x, b.y);
    }

    /// All cells, column by column, bottom to top.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> {
        let (w, h) = (self.width, self.height);
        (0..w).flat_map(move |x| (0..h).map(move |y| CellIndex::new(x, y)))
    }

    /// Keys of the tiles in every cell, row-major, bottom row first.
    pub fn keys(&self) -> impl Iterator<Item = TileKey> + '_ {
        self.cells.iter().copied()
    }

    /// Ids in row-major order, bottom row first.
    pub fn ids(&self) -> Vec<TileId> {
        let mut out = Vec::with_capacity(self.cells.len());
        self.write_ids(&mut out);
        out
    }

    /// Allocation-reusing variant of [`Grid::ids`].
    pub fn write_ids(&self, out: &mut Vec<TileId>) {
        out.clear();
        out.extend(self.cells.iter().map(|k| self.tiles[k.index()].id()));
    }

    /// Rows top to bottom, as they appear on screen (handy in test failures).
    pub fn to_rows(&self) -> Vec<Vec<TileId>> {
        (0..self.height as i16)
            .rev()
            .map(|y| {
                (0..self.width as i16)
                    .map(|x| self.get(x, y).map(Tile::id).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DESTROYED_ID;

    fn grid_3x2() -> Grid {
        // bottom row: 0 1 2, top row: 3 4 5
        Grid::from_ids(3, 2, &[0, 1, 2, 3, 4, 5])
    }

    #[test]
    fn test_index_calculation() {
        let grid = grid_3x2();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(2, 0), Some(2));
        assert_eq!(grid.index(0, 1), Some(3));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(3, 0), None);
        assert_eq!(grid.index(0, 2), None);
    }

    #[test]
    fn test_get_uses_bottom_up_rows() {
        let grid = grid_3x2();
        assert_eq!(grid.get(0, 0).map(Tile::id), Some(0));
        assert_eq!(grid.get(2, 1).map(Tile::id), Some(5));
        assert!(grid.get(3, 1).is_none());
        assert_eq!(grid.to_rows(), vec![vec![3, 4, 5], vec![0, 1, 2]]);
    }

    #[test]
    fn test_swap_moves_identity_and_position() {
        let mut grid = grid_3x2();
        let a = CellIndex::new(0, 0);
        let b = CellIndex::new(0, 1);
        let key_a = grid.key_at(a);
        let key_b = grid.key_at(b);

        grid.swap_cells(a, b);

        assert_eq!(grid.key_at(a), key_b);
        assert_eq!(grid.key_at(b), key_a);
        assert_eq!(grid.tile(key_a).cell(), b);
        assert_eq!(grid.tile(key_b).cell(), a);
        assert_eq!(grid.tile_at(a).id(), 3);
        assert_eq!(grid.tile_at(b).id(), 0);
    }

    #[test]
    fn test_swap_twice_restores_ids() {
        let mut grid = grid_3x2();
        let before = grid.ids();
        grid.swap_cells(CellIndex::new(1, 0), CellIndex::new(2, 0));
        assert_ne!(grid.ids(), before);
        grid.swap_cells(CellIndex::new(1, 0), CellIndex::new(2, 0));
        assert_eq!(grid.ids(), before);
    }

    #[test]
    fn test_cells_iterates_columns_bottom_up() {
        let grid = grid_3x2();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], CellIndex::new(0, 0));
        assert_eq!(cells[1], CellIndex::new(0, 1));
        assert_eq!(cells[2], CellIndex::new(1, 0));
    }

    #[test]
    fn test_destroyed_sentinel_survives_build() {
        let grid = Grid::from_ids(1, 2, &[DESTROYED_ID, 2]);
        assert!(grid.tile_at(CellIndex::new(0, 0)).is_destroyed());
        assert!(!grid.tile_at(CellIndex::new(0, 1)).is_destroyed());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_tile_at_out_of_bounds_panics() {
        let grid = grid_3x2();
        grid.tile_at(CellIndex::new(3, 0));
    }
}
