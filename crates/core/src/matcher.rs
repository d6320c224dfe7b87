//! Match detection
//!
//! A pure function from a grid snapshot to the set of tiles that sit in a
//! straight horizontal or vertical run of at least [`MIN_RUN`] same-id,
//! non-destroyed tiles.
//!
//! Every live tile is used as a scan origin. From the origin we count the
//! contiguous matching neighbours in both directions of an axis; the axis
//! contributes those neighbours when they add up to `MIN_RUN - 1` or more. The
//! origin itself joins when the contributing axes together supply at least
//! `MIN_RUN - 1` neighbours. The union over all origins is independent of scan
//! order, and a tile ends up in the set exactly when it belongs to a run of
//! three or more.

use crate::grid::Grid;
use crate::tile::TileKey;
use crate::types::{CellIndex, Direction, MIN_RUN};

const AXES: [(Direction, Direction); 2] = [
    (Direction::Left, Direction::Right),
    (Direction::Down, Direction::Up),
];

/// Distinct matched tiles, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    tiles: Vec<TileKey>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, key: TileKey) -> bool {
        self.tiles.binary_search(&key).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileKey> + '_ {
        self.tiles.iter().copied()
    }

    /// Current cells of the matched tiles, sorted.
    pub fn cells(&self, grid: &Grid) -> Vec<CellIndex> {
        let mut cells: Vec<_> = self.iter().map(|k| grid.tile(k).cell()).collect();
        cells.sort();
        cells
    }
}

/// Number of contiguous tiles matching the origin, walking from `origin` in `dir`.
fn run_length(grid: &Grid, origin: CellIndex, dir: Direction) -> usize {
    let tile = grid.tile_at(origin);
    let (dx, dy) = dir.delta();
    let mut x = origin.x as i16 + dx as i16;
    let mut y = origin.y as i16 + dy as i16;
    let mut count = 0;
    while let Some(next) = grid.get(x, y) {
        if !tile.matches(next) {
            break;
        }
        count += 1;
        x += dx as i16;
        y += dy as i16;
    }
    count
}

fn mark_run(grid: &Grid, origin: CellIndex, dir: Direction, len: usize, marked: &mut [bool]) {
    let (dx, dy) = dir.delta();
    for step in 1..=len as i16 {
        let x = origin.x as i16 + dx as i16 * step;
        let y = origin.y as i16 + dy as i16 * step;
        if let Some(tile) = grid.get(x, y) {
            marked[tile.key().index()] = true;
        }
    }
}

/// Every tile that is part of a horizontal or vertical run of three or more.
pub fn find_all_matches(grid: &Grid) -> MatchSet {
    let mut marked = vec![false; grid.tile_count()];

    for origin in grid.cells() {
        let tile = grid.tile_at(origin);
        if tile.is_destroyed() {
            continue;
        }

        let mut neighbours = 0;
        for (back, forth) in AXES {
            let before = run_length(grid, origin, back);
            let after = run_length(grid, origin, forth);
            if before + after >= MIN_RUN - 1 {
                mark_run(grid, origin, back, before, &mut marked);
                mark_run(grid, origin, forth, after, &mut marked);
                neighbours += before + after;
            }
        }

        if neighbours >= MIN_RUN - 1 {
            marked[tile.key().index()] = true;
        }
    }

    let tiles = marked
        .iter()
        .enumerate()
        .filter(|(_, m)| **m)
        .map(|(i, _)| TileKey(i as u16))
        .collect();
    MatchSet { tiles }
}

/// Cheap check used before committing to a full scan.
pub fn has_match(grid: &Grid) -> bool {
    grid.cells().any(|origin| {
        if grid.tile_at(origin).is_destroyed() {
            return false;
        }
        AXES.iter().any(|&(back, forth)| {
            run_length(grid, origin, back) + run_length(grid, origin, forth) >= MIN_RUN - 1
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TileId, DESTROYED_ID};

    /// Build a grid from rows listed top to bottom.
    fn grid(rows: &[&[TileId]]) -> Grid {
        let height = rows.len();
        let width = rows[0].len();
        let mut ids = Vec::with_capacity(width * height);
        for row in rows.iter().rev() {
            ids.extend_from_slice(row);
        }
        Grid::from_ids(width as u8, height as u8, &ids)
    }

    fn matched_cells(g: &Grid) -> Vec<(u8, u8)> {
        find_all_matches(g)
            .cells(g)
            .into_iter()
            .map(|c| (c.x, c.y))
            .collect()
    }

    #[test]
    fn run_of_two_is_not_a_match() {
        let g = grid(&[&[1, 1, 2, 3], &[2, 3, 1, 2]]);
        assert!(find_all_matches(&g).is_empty());
        assert!(!has_match(&g));
    }

    #[test]
    fn horizontal_run_of_three() {
        let g = grid(&[&[4, 0, 4, 4], &[1, 1, 1, 2]]);
        assert_eq!(matched_cells(&g), vec![(0, 0), (1, 0), (2, 0)]);
        assert!(has_match(&g));
    }

    #[test]
    fn middle_of_single_axis_run_is_included() {
        let g = grid(&[&[2], &[0], &[0], &[0], &[1]]);
        assert_eq!(matched_cells(&g), vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn run_of_four() {
        let g = grid(&[&[3, 3, 3, 3, 1]]);
        assert_eq!(find_all_matches(&g).len(), 4);
    }

    #[test]
    fn l_junction_counts_corner_once() {
        let g = grid(&[
            &[2, 0, 1],
            &[2, 1, 0],
            &[2, 2, 2],
        ]);
        let m = find_all_matches(&g);
        assert_eq!(m.len(), 5);
        assert_eq!(matched_cells(&g), vec![(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)]);
    }

    #[test]
    fn destroyed_tiles_break_runs() {
        let g = grid(&[&[1, 1, DESTROYED_ID, 1, 1]]);
        assert!(find_all_matches(&g).is_empty());
    }

    #[test]
    fn destroyed_tiles_never_match_each_other() {
        let g = grid(&[&[DESTROYED_ID, DESTROYED_ID, DESTROYED_ID]]);
        assert!(find_all_matches(&g).is_empty());
        assert!(!has_match(&g));
    }
}
