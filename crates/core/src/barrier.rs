//! Completion barrier.
//!
//! A phase that fans out several animations joins their task ids here and
//! only moves on once every one of them has reported completion. There is no
//! timeout: a task that never completes holds the cascade forever.

use log::trace;

use crate::mover::TaskId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Barrier {
    pending: Vec<TaskId>,
}

impl Barrier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&mut self, task: TaskId) {
        self.pending.push(task);
    }

    /// Record a completion. Returns `false` when `task` was not being awaited.
    pub fn complete(&mut self, task: TaskId) -> bool {
        match self.pending.iter().position(|t| *t == task) {
            Some(i) => {
                self.pending.swap_remove(i);
                trace!("barrier: {:?} done, {} left", task, self.pending.len());
                true
            }
            None => false,
        }
    }

    /// True once every joined task has completed (and for an empty barrier).
    pub fn is_satisfied(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mover::{Mover, TweenMover};
    use crate::tile::TileKey;

    #[test]
    fn empty_barrier_is_satisfied() {
        assert!(Barrier::new().is_satisfied());
    }

    #[test]
    fn waits_for_every_task() {
        let mut mover = TweenMover::new();
        let mut barrier = Barrier::new();
        let a = mover.start_destroy(TileKey(0), 1, 1);
        let b = mover.start_destroy(TileKey(1), 1, 1);
        barrier.join(a);
        barrier.join(b);

        assert!(!barrier.is_satisfied());
        assert!(barrier.complete(b));
        assert!(!barrier.is_satisfied());
        assert!(barrier.complete(a));
        assert!(barrier.is_satisfied());
    }

    #[test]
    fn unknown_and_repeated_completions_are_ignored() {
        let mut mover = TweenMover::new();
        let mut barrier = Barrier::new();
        let a = mover.start_destroy(TileKey(0), 1, 1);
        let stray = mover.start_destroy(TileKey(1), 1, 1);
        barrier.join(a);

        assert!(!barrier.complete(stray));
        assert_eq!(barrier.pending(), 1);
        assert!(barrier.complete(a));
        assert!(!barrier.complete(a));
    }
}
