//! Board module - owns the grid and runs the cascade state machine
//!
//! One player swap drives the board through
//!
//! ```text
//! Idle -> Swapping -> Matching -> Clearing -> Dropping -> Filling -> Repositioning
//!                        ^                                               |
//!                        +-----------------------------------------------+
//! ```
//!
//! until a matching pass comes up empty. Phases that hand animations to the
//! [`Mover`] join the returned task ids on a [`Barrier`]; the board does not
//! move on until the driver has delivered every completion through
//! [`Board::complete`] and called [`Board::step`] again. Grid writes only
//! happen inside `step`/`request_swap`, right before a barrier is started or
//! right after one is satisfied.

use std::fmt;

use log::{debug, trace, warn};

use crate::barrier::Barrier;
use crate::generator::TileGenerator;
use crate::gravity::{apply_drops, compute_drops};
use crate::grid::Grid;
use crate::matcher::{find_all_matches, has_match};
use crate::mover::{Mover, TaskId};
use crate::rng::RandomSource;
use crate::scoring::{ScoreAccumulator, ScoreSink};
use crate::tile::TileKey;
use crate::types::{
    BoardConfig, BoardLayout, CellIndex, ConfigError, GridPoint, RefillPolicy, TileId, Timing,
    DESTROYED_ID,
};

/// Where the board is in its resolution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Waiting for the swap animation of `a` and `b`. `reverting` is set
    /// once the swap produced no match and the tiles are travelling back.
    Swapping {
        a: CellIndex,
        b: CellIndex,
        reverting: bool,
    },
    Matching,
    /// Destroy animations in flight.
    Clearing,
    Dropping,
    Filling,
    /// Position animations in flight.
    Repositioning,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Swapping {
                reverting: false, ..
            } => "swapping",
            Phase::Swapping {
                reverting: true, ..
            } => "reverting",
            Phase::Matching => "matching",
            Phase::Clearing => "clearing",
            Phase::Dropping => "dropping",
            Phase::Filling => "filling",
            Phase::Repositioning => "repositioning",
        }
    }
}

/// Why a swap request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejected {
    /// A swap or cascade is still running.
    Busy,
    /// The session has ended.
    GameOver,
    OutOfBounds,
    NotAdjacent,
}

impl fmt::Display for SwapRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SwapRejected::Busy => "board is busy",
            SwapRejected::GameOver => "game is over",
            SwapRejected::OutOfBounds => "cell is outside the board",
            SwapRejected::NotAdjacent => "cells are not adjacent",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for SwapRejected {}

/// Things that happened on the board since the last [`Board::take_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    SwapStarted { a: CellIndex, b: CellIndex },
    /// The swap produced a match; a cascade sequence begins.
    SwapAccepted { a: CellIndex, b: CellIndex },
    /// No match: the tiles are animating back.
    SwapReverted { a: CellIndex, b: CellIndex },
    /// One cascade pass. `combo > 1` means the pass was a chain reaction.
    Matched {
        tiles: usize,
        combo: u32,
        score_delta: u64,
    },
    /// Survivors that fell, as `(from, to)`.
    Dropped { moves: Vec<(CellIndex, CellIndex)> },
    /// Cells that received a fresh tile.
    Filled { cells: Vec<CellIndex> },
    /// The sequence is over; `combo` is the number of passes that matched.
    Settled { combo: u32 },
}

/// The injected boundaries a board talks to while it runs.
pub struct Collaborators<'a> {
    pub mover: &'a mut dyn Mover,
    pub random: &'a mut dyn RandomSource,
    pub score: &'a mut dyn ScoreSink,
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    layout: BoardLayout,
    timing: Timing,
    refill: RefillPolicy,
    generator: TileGenerator,
    accumulator: ScoreAccumulator,
    phase: Phase,
    barrier: Barrier,
    combo: u32,
    events: Vec<BoardEvent>,
}

impl Board {
    /// Build and populate a board. No cell starts inside a run of three as
    /// long as there are at least three tile types.
    pub fn new(config: &BoardConfig, random: &mut dyn RandomSource) -> Result<Self, ConfigError> {
        config.validate()?;

        let (w, h) = (config.width, config.height);
        let generator = TileGenerator::new(config.tile_types);
        let mut ids = vec![DESTROYED_ID; config.cell_count()];

        for x in 0..w {
            for y in 0..h {
                let id = generator.pick_id(random, x, y, |nx, ny| live_id(&ids, w, h, nx, ny));
                ids[y as usize * w as usize + x as usize] = id;
            }
        }

        debug!(
            "board: populated {}x{} with {} tile types",
            w, h, config.tile_types
        );
        Ok(Self::with_grid(config, Grid::from_ids(w, h, &ids)))
    }

    /// Build a board from fixed ids, rows listed top to bottom as displayed.
    /// [`DESTROYED_ID`] marks a cell that is already cleared.
    pub fn from_rows<R: AsRef<[TileId]>>(
        config: &BoardConfig,
        rows: &[R],
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let (w, h) = (config.width as usize, config.height as usize);
        if rows.len() != h {
            let row = rows.len().min(h);
            return Err(ConfigError::RowShape {
                expected_rows: h,
                expected_width: w,
                row,
                found: rows.get(row).map_or(0, |r| r.as_ref().len()),
            });
        }

        let mut ids = vec![DESTROYED_ID; w * h];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != w {
                return Err(ConfigError::RowShape {
                    expected_rows: h,
                    expected_width: w,
                    row: r,
                    found: row.len(),
                });
            }
            let y = h - 1 - r;
            for (x, &id) in row.iter().enumerate() {
                if id != DESTROYED_ID && (id < 0 || id >= config.tile_types as TileId) {
                    return Err(ConfigError::TileIdOutOfRange {
                        id,
                        x: x as u8,
                        y: y as u8,
                        tile_types: config.tile_types,
                    });
                }
                ids[y * w + x] = id;
            }
        }

        Ok(Self::with_grid(
            config,
            Grid::from_ids(config.width, config.height, &ids),
        ))
    }

    fn with_grid(config: &BoardConfig, grid: Grid) -> Self {
        Self {
            grid,
            layout: config.layout,
            timing: config.timing,
            refill: config.refill,
            generator: TileGenerator::new(config.tile_types),
            accumulator: ScoreAccumulator::new(config.score),
            phase: Phase::Idle,
            barrier: Barrier::new(),
            combo: 0,
            events: Vec::new(),
        }
    }

    // ========== Queries ==========

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> u8 {
        self.grid.width()
    }

    pub fn height(&self) -> u8 {
        self.grid.height()
    }

    pub fn tile_types(&self) -> u8 {
        self.generator.tile_types()
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_swapping(&self) -> bool {
        matches!(self.phase, Phase::Swapping { .. })
    }

    /// A cascade sequence is running.
    pub fn is_processing(&self) -> bool {
        !matches!(self.phase, Phase::Idle | Phase::Swapping { .. })
    }

    /// Some requested animation has not reported back yet.
    pub fn is_animating(&self) -> bool {
        !self.barrier.is_satisfied()
    }

    /// Only an idle board takes new swaps or selections.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Passes that matched in the current (or last) sequence.
    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn id_at(&self, cell: CellIndex) -> TileId {
        self.grid.tile_at(cell).id()
    }

    /// World position of a grid point under this board's layout.
    pub fn world_position(&self, point: GridPoint) -> [f32; 2] {
        self.layout
            .world_position(point, self.grid.width(), self.grid.height())
    }

    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== Driving ==========

    /// Swap two adjacent cells and start the swap animation.
    pub fn request_swap(
        &mut self,
        a: CellIndex,
        b: CellIndex,
        deps: &mut Collaborators<'_>,
    ) -> Result<(), SwapRejected> {
        if self.phase != Phase::Idle {
            return Err(SwapRejected::Busy);
        }
        if !self.grid.contains(a) || !self.grid.contains(b) {
            return Err(SwapRejected::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return Err(SwapRejected::NotAdjacent);
        }

        self.exchange(a, b, deps.mover);
        self.events.push(BoardEvent::SwapStarted { a, b });
        self.transition(Phase::Swapping {
            a,
            b,
            reverting: false,
        });
        Ok(())
    }

    /// Run a cascade on the board as it stands, without a swap. Cells that
    /// are already destroyed drop and refill first.
    pub fn resolve(&mut self, deps: &mut Collaborators<'_>) -> Result<(), SwapRejected> {
        if self.phase != Phase::Idle {
            return Err(SwapRejected::Busy);
        }
        self.combo = 0;
        let has_holes = self.grid.cells().any(|c| self.grid.tile_at(c).is_destroyed());
        // A cleared board resumes right where the destroy animations would end.
        self.transition(if has_holes {
            Phase::Clearing
        } else {
            Phase::Matching
        });
        self.step(deps);
        Ok(())
    }

    /// Deliver one animation completion. Returns `false` for tasks the board
    /// is not waiting on.
    pub fn complete(&mut self, task: TaskId) -> bool {
        if self.barrier.complete(task) {
            true
        } else {
            warn!("board: ignoring completion of unknown task {:?}", task);
            false
        }
    }

    /// Advance through every phase whose barrier is satisfied. Synchronous
    /// phases run back to back; the call returns once the board is idle or
    /// waiting on animations.
    pub fn step(&mut self, deps: &mut Collaborators<'_>) {
        while self.barrier.is_satisfied() {
            let next = match self.phase {
                Phase::Idle => break,
                Phase::Swapping {
                    a,
                    b,
                    reverting: false,
                } => self.check_swap(a, b, deps.mover),
                Phase::Swapping {
                    reverting: true, ..
                } => Phase::Idle,
                Phase::Matching => self.match_pass(deps),
                Phase::Clearing => self.drop_pass(),
                Phase::Dropping => self.fill_pass(deps.random),
                Phase::Filling => self.reposition_pass(deps.mover),
                Phase::Repositioning => Phase::Matching,
            };
            self.transition(next);
        }
    }

    // ========== Phases ==========

    fn check_swap(&mut self, a: CellIndex, b: CellIndex, mover: &mut dyn Mover) -> Phase {
        if has_match(&self.grid) {
            self.combo = 0;
            self.events.push(BoardEvent::SwapAccepted { a, b });
            return Phase::Matching;
        }
        self.exchange(a, b, mover);
        self.events.push(BoardEvent::SwapReverted { a, b });
        Phase::Swapping {
            a,
            b,
            reverting: true,
        }
    }

    fn match_pass(&mut self, deps: &mut Collaborators<'_>) -> Phase {
        let matches = find_all_matches(&self.grid);
        if matches.is_empty() {
            self.events.push(BoardEvent::Settled { combo: self.combo });
            debug!("board: settled after {} pass(es)", self.combo);
            return Phase::Idle;
        }

        self.combo += 1;
        let score_delta = self.accumulator.increment(matches.len(), self.combo);
        deps.score.add(score_delta);
        self.events.push(BoardEvent::Matched {
            tiles: matches.len(),
            combo: self.combo,
            score_delta,
        });
        debug!(
            "board: pass {} matched {} tiles (+{})",
            self.combo,
            matches.len(),
            score_delta
        );

        for key in matches.iter() {
            self.grid.tile_mut(key).mark_destroyed();
            let task = deps.mover.start_destroy(
                key,
                self.timing.destroy_grow_ms,
                self.timing.destroy_shrink_ms,
            );
            self.barrier.join(task);
        }
        Phase::Clearing
    }

    fn drop_pass(&mut self) -> Phase {
        let table = compute_drops(&self.grid);
        if !table.is_empty() {
            let moves = apply_drops(&mut self.grid, &table);
            self.events.push(BoardEvent::Dropped { moves });
        }
        Phase::Dropping
    }

    fn fill_pass(&mut self, random: &mut dyn RandomSource) -> Phase {
        let (w, h) = (self.grid.width(), self.grid.height());
        let mut filled = Vec::new();

        // Left to right, bottom to top: under `AvoidMatches` the left and
        // lower neighbours of every refilled cell are already decided.
        for x in 0..w {
            let gap = (0..h)
                .filter(|&y| self.grid.tile_at(CellIndex::new(x, y)).is_destroyed())
                .count() as i16;
            for y in 0..h {
                let cell = CellIndex::new(x, y);
                if !self.grid.tile_at(cell).is_destroyed() {
                    continue;
                }
                let id = match self.refill {
                    RefillPolicy::Uniform => self.generator.uniform_id(random),
                    RefillPolicy::AvoidMatches => {
                        let grid = &self.grid;
                        self.generator.pick_id(random, x, y, |nx, ny| {
                            grid.get(nx, ny)
                                .filter(|t| !t.is_destroyed())
                                .map(|t| t.id())
                        })
                    }
                };
                let spawn = GridPoint::new(x as i16, y as i16 + gap);
                self.grid.tile_at_mut(cell).revive(id, cell, spawn);
                filled.push(cell);
            }
        }

        if !filled.is_empty() {
            self.events.push(BoardEvent::Filled { cells: filled });
        }
        Phase::Filling
    }

    fn reposition_pass(&mut self, mover: &mut dyn Mover) -> Phase {
        let stale: Vec<TileKey> = self
            .grid
            .cells()
            .map(|c| self.grid.tile_at(c))
            .filter(|t| t.rest() != t.cell().point())
            .map(|t| t.key())
            .collect();
        for key in stale {
            self.send_home(key, mover);
        }
        Phase::Repositioning
    }

    // ========== Helpers ==========

    /// Logical swap plus animations for both tiles.
    fn exchange(&mut self, a: CellIndex, b: CellIndex, mover: &mut dyn Mover) {
        self.grid.swap_cells(a, b);
        let (ka, kb) = (self.grid.key_at(a), self.grid.key_at(b));
        self.send_home(ka, mover);
        self.send_home(kb, mover);
    }

    /// Animate a tile from where it was last sent to its logical cell.
    fn send_home(&mut self, key: TileKey, mover: &mut dyn Mover) {
        let tile = self.grid.tile(key);
        let target = tile.cell().point();
        let from = self.world_position(tile.rest());
        let to = self.world_position(target);
        let task = mover.start_move(key, from, to, self.timing.move_ms);
        trace!("board: tile {:?} -> {:?} as {:?}", key, target, task);
        self.grid.tile_mut(key).set_rest(target);
        self.barrier.join(task);
    }

    fn transition(&mut self, next: Phase) {
        if next != self.phase {
            debug!("board: {} -> {}", self.phase.name(), next.name());
            self.phase = next;
        }
    }
}

/// Id of a populated, live cell in a row-major id buffer.
fn live_id(ids: &[TileId], w: u8, h: u8, x: i16, y: i16) -> Option<TileId> {
    if x < 0 || y < 0 || x >= w as i16 || y >= h as i16 {
        return None;
    }
    let id = ids[y as usize * w as usize + x as usize];
    (id != DESTROYED_ID).then_some(id)
}
