//! Animation boundary.
//!
//! The engine asks a [`Mover`] to slide or destroy tiles and gets back a
//! [`TaskId`] per request. The mover later reports exactly one completion per
//! task (via [`crate::Board::complete`]); the engine never looks at progress.
//!
//! [`TweenMover`] is a deterministic, tick-driven implementation used by the
//! game session, the terminal front-end and the tests.

use log::trace;

use crate::tile::TileKey;

/// Handle for one requested animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u32);

impl TaskId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

pub trait Mover {
    /// Slide `tile` from `from` to `to` (world coordinates) over `duration_ms`.
    fn start_move(&mut self, tile: TileKey, from: [f32; 2], to: [f32; 2], duration_ms: u32)
        -> TaskId;

    /// Play the destroy animation: grow for `grow_ms`, then shrink for `shrink_ms`.
    fn start_destroy(&mut self, tile: TileKey, grow_ms: u32, shrink_ms: u32) -> TaskId;
}

/// Scale reached at the end of the grow step.
const DESTROY_PEAK_SCALE: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tween {
    Move { from: [f32; 2], to: [f32; 2] },
    Destroy { grow_ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Task {
    id: TaskId,
    tile: TileKey,
    tween: Tween,
    elapsed_ms: u32,
    duration_ms: u32,
}

impl Task {
    fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
    }
}

/// Linear tweens advanced by a fixed timestep.
///
/// A task finishes on the first `advance` call that brings its elapsed time
/// to its duration, never inside `start_*`, so zero-length tweens still
/// complete on the next tick.
#[derive(Debug, Clone, Default)]
pub struct TweenMover {
    next_id: u32,
    tasks: Vec<Task>,
}

impl TweenMover {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, tile: TileKey, tween: Tween, duration_ms: u32) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.tasks.push(Task {
            id,
            tile,
            tween,
            elapsed_ms: 0,
            duration_ms,
        });
        trace!("tween {:?} started for tile {:?} ({}ms)", id, tile, duration_ms);
        id
    }

    /// Advance every task and return the ones that finished, in start order.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<TaskId> {
        let mut done = Vec::new();
        self.tasks.retain_mut(|task| {
            task.elapsed_ms = task.elapsed_ms.saturating_add(elapsed_ms);
            if task.elapsed_ms >= task.duration_ms {
                done.push(task.id);
                false
            } else {
                true
            }
        });
        if !done.is_empty() {
            trace!("{} tween(s) finished", done.len());
        }
        done
    }

    /// Tasks still running.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Interpolated world position of a tile that is currently sliding.
    pub fn position_of(&self, tile: TileKey) -> Option<[f32; 2]> {
        self.tasks.iter().rev().find_map(|task| match task.tween {
            Tween::Move { from, to } if task.tile == tile => {
                let t = task.progress();
                Some([
                    from[0] + (to[0] - from[0]) * t,
                    from[1] + (to[1] - from[1]) * t,
                ])
            }
            _ => None,
        })
    }

    /// Current scale of a tile that is being destroyed.
    pub fn scale_of(&self, tile: TileKey) -> Option<f32> {
        self.tasks.iter().find_map(|task| match task.tween {
            Tween::Destroy { grow_ms } if task.tile == tile => {
                let e = task.elapsed_ms;
                if e < grow_ms {
                    Some(1.0 + (DESTROY_PEAK_SCALE - 1.0) * e as f32 / grow_ms as f32)
                } else {
                    let shrink_ms = task.duration_ms - grow_ms;
                    if shrink_ms == 0 {
                        return Some(0.0);
                    }
                    let t = (e - grow_ms) as f32 / shrink_ms as f32;
                    Some(DESTROY_PEAK_SCALE * (1.0 - t.min(1.0)))
                }
            }
            _ => None,
        })
    }
}

impl Mover for TweenMover {
    fn start_move(
        &mut self,
        tile: TileKey,
        from: [f32; 2],
        to: [f32; 2],
        duration_ms: u32,
    ) -> TaskId {
        self.push(tile, Tween::Move { from, to }, duration_ms)
    }

    fn start_destroy(&mut self, tile: TileKey, grow_ms: u32, shrink_ms: u32) -> TaskId {
        self.push(
            tile,
            Tween::Destroy { grow_ms },
            grow_ms.saturating_add(shrink_ms),
        )
    }
}
