//! Game session module - one board plus everything around it
//!
//! [`Game`] owns the board and the collaborators the board is handed on every
//! call: a [`TweenMover`] for animations, a [`SimpleRng`] and a
//! [`ScoreBoard`]. It also runs the session timer and the game-over flag that
//! gates player input.

use log::info;

use crate::board::{Board, BoardEvent, Collaborators, SwapRejected};
use crate::mover::TweenMover;
use crate::rng::SimpleRng;
use crate::scoring::ScoreBoard;
use crate::snapshot::{GameSnapshot, TileMotion};
use crate::tile::TileKey;
use crate::types::{BoardConfig, CellIndex, ConfigError};

/// Session countdown. An untimed clock never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    duration_ms: Option<u32>,
    elapsed_ms: u32,
}

impl GameClock {
    pub fn new(duration_ms: Option<u32>) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0,
        }
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn remaining_ms(&self) -> Option<u32> {
        self.duration_ms
            .map(|d| d.saturating_sub(self.elapsed_ms))
    }

    /// Runs out once the elapsed time is past the duration, not on it.
    pub fn is_expired(&self) -> bool {
        self.duration_ms.is_some_and(|d| self.elapsed_ms > d)
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    config: BoardConfig,
    board: Board,
    mover: TweenMover,
    rng: SimpleRng,
    scores: ScoreBoard,
    clock: GameClock,
    game_over: bool,
    /// Increments on every restart.
    episode_id: u32,
}

impl Game {
    pub fn new(config: BoardConfig, seed: u32) -> Result<Self, ConfigError> {
        let mut rng = SimpleRng::new(seed);
        let board = Board::new(&config, &mut rng)?;
        let clock = GameClock::new(config.game_duration_ms);
        Ok(Self {
            config,
            board,
            mover: TweenMover::new(),
            rng,
            scores: ScoreBoard::new(),
            clock,
            game_over: false,
            episode_id: 0,
        })
    }

    /// Advance the session by `elapsed_ms`: timer, animations, then every
    /// board phase that became ready.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !self.game_over {
            self.clock.advance(elapsed_ms);
            if self.clock.is_expired() {
                self.set_game_over();
            }
        }

        for task in self.mover.advance(elapsed_ms) {
            self.board.complete(task);
        }
        let mut deps = Collaborators {
            mover: &mut self.mover,
            random: &mut self.rng,
            score: &mut self.scores,
        };
        self.board.step(&mut deps);

        // A cascade running past the buzzer still counts.
        if self.game_over {
            self.scores.commit_highscore();
        }
    }

    pub fn request_swap(&mut self, a: CellIndex, b: CellIndex) -> Result<(), SwapRejected> {
        if self.game_over {
            return Err(SwapRejected::GameOver);
        }
        let mut deps = Collaborators {
            mover: &mut self.mover,
            random: &mut self.rng,
            score: &mut self.scores,
        };
        self.board.request_swap(a, b, &mut deps)
    }

    /// Selections are only taken while the board is idle and the game runs.
    pub fn accepts_input(&self) -> bool {
        !self.game_over && self.board.accepts_input()
    }

    /// End the session (external timer hook; the clock calls this too).
    pub fn set_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.scores.commit_highscore();
        info!(
            "game over: score {} (best {})",
            self.scores.current(),
            self.scores.highscore()
        );
    }

    /// Start a new session on a fresh board. The high score carries over.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.scores.commit_highscore();
        self.board = Board::new(&self.config, &mut self.rng)?;
        self.mover = TweenMover::new();
        self.scores.reset_current();
        self.clock.reset();
        self.game_over = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        info!("restart: episode {}", self.episode_id);
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        self.board.take_events()
    }

    // ========== Getters ==========

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mover(&self) -> &TweenMover {
        &self.mover
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.grid().write_ids(&mut out.ids);
        out.motion.clear();
        out.motion.extend(
            self.board
                .grid()
                .keys()
                .map(|key| tile_motion(&self.mover, key)),
        );
        out.phase = self.board.phase();
        out.animating = self.board.is_animating();
        out.combo = self.board.combo();
        out.score = self.scores.current();
        out.highscore = self.scores.highscore();
        out.remaining_ms = self.clock.remaining_ms();
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn tile_motion(mover: &TweenMover, key: TileKey) -> TileMotion {
    match mover.scale_of(key) {
        Some(scale) if scale >= 1.0 => TileMotion::Popping,
        Some(_) => TileMotion::Vanishing,
        None if mover.position_of(key).is_some() => TileMotion::Sliding,
        None => TileMotion::Still,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Phase;

    fn untimed(w: u8, h: u8) -> BoardConfig {
        BoardConfig {
            game_duration_ms: None,
            ..BoardConfig::with_size(w, h, 5)
        }
    }

    #[test]
    fn test_clock_saturates() {
        let mut clock = GameClock::new(Some(100));
        clock.advance(60);
        assert_eq!(clock.remaining_ms(), Some(40));
        assert!(!clock.is_expired());
        clock.advance(60);
        assert_eq!(clock.remaining_ms(), Some(0));
        assert!(clock.is_expired());
    }

    #[test]
    fn test_clock_expires_only_past_duration() {
        let mut clock = GameClock::new(Some(100));
        clock.advance(100);
        assert_eq!(clock.remaining_ms(), Some(0));
        assert!(!clock.is_expired());
        clock.advance(1);
        assert!(clock.is_expired());
    }

    #[test]
    fn test_untimed_clock_never_expires() {
        let mut clock = GameClock::new(None);
        clock.advance(u32::MAX);
        assert_eq!(clock.remaining_ms(), None);
        assert!(!clock.is_expired());
    }

    #[test]
    fn test_new_game_is_playable() {
        let game = Game::new(untimed(6, 6), 42).unwrap();
        assert!(game.accepts_input());
        let snap = game.snapshot();
        assert!(snap.playable());
        assert_eq!(snap.ids.len(), 36);
        assert_eq!(snap.phase, Phase::Idle);
    }

    #[test]
    fn test_invalid_config_is_refused() {
        assert_eq!(
            Game::new(BoardConfig::with_size(4, 0, 3), 1).err(),
            Some(ConfigError::ZeroHeight)
        );
    }

    #[test]
    fn test_timer_ends_game_and_blocks_swaps() {
        let config = BoardConfig {
            game_duration_ms: Some(32),
            ..BoardConfig::with_size(5, 5, 5)
        };
        let mut game = Game::new(config, 3).unwrap();
        game.tick(16);
        assert!(!game.is_game_over());
        // 32ms elapsed: time is up but not yet over
        game.tick(16);
        assert!(!game.is_game_over());
        game.tick(16);
        assert!(game.is_game_over());
        assert!(!game.accepts_input());
        assert_eq!(
            game.request_swap(CellIndex::new(0, 0), CellIndex::new(1, 0)),
            Err(SwapRejected::GameOver)
        );
    }

    #[test]
    fn test_restart_resets_session() {
        let mut game = Game::new(untimed(5, 5), 9).unwrap();
        game.set_game_over();
        game.restart().unwrap();
        assert!(!game.is_game_over());
        assert_eq!(game.episode_id(), 1);
        assert_eq!(game.scores().current(), 0);
        assert_eq!(game.clock().elapsed_ms(), 0);
    }
}
