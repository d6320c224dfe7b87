//! Score calculation.
//!
//! [`ScoreAccumulator`] turns one cascade pass into a score delta:
//!
//! ```text
//! delta = (matched_tiles * tile_ratio) * (combo * combo_ratio)
//! ```
//!
//! The engine only ever pushes deltas into a [`ScoreSink`]; running totals
//! and the high score live in [`ScoreBoard`], owned by the session.

use crate::types::ScoreRatios;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreAccumulator {
    tile_ratio: u32,
    combo_ratio: u32,
}

impl ScoreAccumulator {
    pub fn new(ratios: ScoreRatios) -> Self {
        Self {
            tile_ratio: ratios.tile_ratio,
            combo_ratio: ratios.combo_ratio,
        }
    }

    /// Score for `matched` tiles cleared at combo depth `combo`.
    ///
    /// Saturates at `u64::MAX`; ratios come straight from user config.
    pub fn increment(&self, matched: usize, combo: u32) -> u64 {
        let tiles = (matched as u64).saturating_mul(self.tile_ratio as u64);
        let chain = (combo as u64).saturating_mul(self.combo_ratio as u64);
        tiles.saturating_mul(chain)
    }
}

impl Default for ScoreAccumulator {
    fn default() -> Self {
        Self::new(ScoreRatios::default())
    }
}

/// Receiver for score deltas.
pub trait ScoreSink {
    fn add(&mut self, delta: u64);
}

/// Running total plus the best total seen this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    current: u64,
    highscore: u64,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_highscore(highscore: u64) -> Self {
        Self {
            current: 0,
            highscore,
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn highscore(&self) -> u64 {
        self.highscore
    }

    /// Raise the high score to the current total if it is higher.
    pub fn commit_highscore(&mut self) -> bool {
        if self.current > self.highscore {
            self.highscore = self.current;
            true
        } else {
            false
        }
    }

    pub fn reset_current(&mut self) {
        self.current = 0;
    }
}

impl ScoreSink for ScoreBoard {
    fn add(&mut self, delta: u64) {
        self.current = self.current.saturating_add(delta);
    }
}

/// Collects deltas without keeping a total; handy for headless runs.
impl ScoreSink for Vec<u64> {
    fn add(&mut self, delta: u64) {
        self.push(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_tiles_at_combo_two() {
        let acc = ScoreAccumulator::new(ScoreRatios {
            tile_ratio: 10,
            combo_ratio: 1,
        });
        assert_eq!(acc.increment(5, 2), 100);
    }

    #[test]
    fn test_combo_ratio_scales_linearly() {
        let acc = ScoreAccumulator::new(ScoreRatios {
            tile_ratio: 10,
            combo_ratio: 3,
        });
        assert_eq!(acc.increment(3, 1), 90);
        assert_eq!(acc.increment(3, 2), 180);
    }

    #[test]
    fn test_huge_ratios_saturate() {
        let acc = ScoreAccumulator::new(ScoreRatios {
            tile_ratio: u32::MAX,
            combo_ratio: u32::MAX,
        });
        assert_eq!(acc.increment(3, 1), u64::MAX);
        assert_eq!(acc.increment(1, 1), u32::MAX as u64 * u32::MAX as u64);
        assert_eq!(acc.increment(0, 5), 0);

        let mut board = ScoreBoard::new();
        board.add(acc.increment(64, 9));
        board.add(acc.increment(64, 10));
        assert_eq!(board.current(), u64::MAX);
    }

    #[test]
    fn test_zero_combo_scores_nothing() {
        assert_eq!(ScoreAccumulator::default().increment(7, 0), 0);
    }

    #[test]
    fn test_highscore_only_rises() {
        let mut board = ScoreBoard::with_highscore(50);
        board.add(30);
        assert!(!board.commit_highscore());
        assert_eq!(board.highscore(), 50);

        board.add(40);
        assert!(board.commit_highscore());
        assert_eq!(board.highscore(), 70);

        board.reset_current();
        assert_eq!(board.current(), 0);
        assert_eq!(board.highscore(), 70);
    }
}
