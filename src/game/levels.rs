//! Level progression: bigger boards and faster ticks.

use std::time::Duration;

use super::{
    config::{Difficulty, GameConfig},
    state::GameState,
};

/// Outcome of a level-up, for the announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    /// Score that completes this level
    pub threshold: usize,
}

pub struct LevelManager {
    size_step: usize,
    speedup: Duration,
    min_interval: Duration,
    score_divisor: usize,
}

impl LevelManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            size_step: config.level_size_step,
            speedup: Duration::from_millis(config.level_speedup_ms),
            min_interval: Duration::from_millis(config.min_tick_interval_ms),
            score_divisor: config.score_divisor.max(1),
        }
    }

    /// Score needed to complete a level on a board of `size`
    pub fn score_needed(&self, size: usize) -> usize {
        size * size / self.score_divisor
    }

    pub fn is_complete(&self, state: &GameState) -> bool {
        state.levels && state.score == self.score_needed(state.board_size())
    }

    /// Advance to the next level. The board is reallocated and cleared.
    pub fn level_up(&self, state: &mut GameState) -> LevelUp {
        state.level += 1;

        let size = state.board_size() + self.size_step;
        state.board.resize(size);
        state.food = None;
        state.tick_interval = state
            .tick_interval
            .saturating_sub(self.speedup)
            .max(self.min_interval);

        let threshold = self.score_needed(size);
        log::info!(
            "Level {} on a {}x{} board, {:?} per tick, {} to go",
            state.level,
            size,
            size,
            state.tick_interval,
            threshold
        );

        LevelUp {
            level: state.level,
            threshold,
        }
    }

    /// Back to level 0 on an easy board
    pub fn restart(&self, state: &mut GameState) {
        let easy = Difficulty::Easy;
        state.level = 0;
        state.board.resize(easy.board_size());
        state.food = None;
        state.tick_interval = easy.tick_interval();
    }
}
