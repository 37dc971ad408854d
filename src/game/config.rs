use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr, time::Duration};
use thiserror::Error;

/// Starting difficulty, picking the board size and tick speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Side length of the square board
    pub fn board_size(&self) -> usize {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Medium => 40,
            Difficulty::Hard => 80,
        }
    }

    /// Base time between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(match self {
            Difficulty::Easy => 150,
            Difficulty::Medium => 75,
            Difficulty::Hard => 35,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Starting difficulty (ignored in levels mode, which always starts easy)
    pub difficulty: Difficulty,
    /// Play the progressive levels mode
    pub levels: bool,
    /// Initial length of the snake, also the starting score
    pub initial_snake_length: usize,
    /// Forced moves after the countdown
    pub warmup_ticks: usize,

    // Timings
    /// Delay of each countdown number
    pub countdown_step_ms: u64,
    /// How long "Level N" and "Get N" stay on screen
    pub level_banner_ms: u64,
    /// Delay before each of the last three segments is cleared
    pub tail_fade_ms: u64,
    /// Delay of the first segment of the head-to-tail chase
    pub chase_base_ms: u64,
    /// Divided by the board size to get the explosion frame delay
    pub explosion_budget_ms: u64,

    // Level progression
    /// Board growth per level
    pub level_size_step: usize,
    /// Tick interval reduction per level
    pub level_speedup_ms: u64,
    /// Floor for the tick interval
    pub min_tick_interval_ms: u64,
    /// Score needed is `size * size / score_divisor`
    pub score_divisor: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            levels: false,
            initial_snake_length: 5,
            warmup_ticks: 5,
            countdown_step_ms: 500,
            level_banner_ms: 1000,
            tail_fade_ms: 500,
            chase_base_ms: 400,
            explosion_budget_ms: 1350,
            level_size_step: 10,
            level_speedup_ms: 20,
            min_tick_interval_ms: 10,
            score_divisor: 40,
        }
    }
}

impl GameConfig {
    /// Create a configuration for a difficulty, without levels
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    /// Create a levels-mode configuration
    pub fn with_levels() -> Self {
        Self {
            levels: true,
            ..Default::default()
        }
    }

    /// Difficulty the board actually starts from
    pub fn starting_difficulty(&self) -> Difficulty {
        if self.levels {
            Difficulty::Easy
        } else {
            self.difficulty
        }
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Reject settings that would put the opening snake or warmup off the
    /// starting board, which is the smallest board in play
    pub fn validate(&self) -> Result<()> {
        let size = self.starting_difficulty().board_size();
        let center = size / 2;

        ensure!(self.initial_snake_length > 0, "initial_snake_length must be at least 1");
        ensure!(
            center + self.initial_snake_length <= size,
            "initial_snake_length {} does not fit on the {size}x{size} starting board (max {})",
            self.initial_snake_length,
            size - center
        );
        ensure!(
            self.warmup_ticks <= center,
            "warmup_ticks {} would run off the {size}x{size} starting board (max {center})",
            self.warmup_ticks
        );
        ensure!(
            !self.levels || self.level_size_step > 0,
            "level_size_step must be positive in levels mode"
        );
        ensure!(self.score_divisor > 0, "score_divisor must be positive");
        ensure!(self.min_tick_interval_ms > 0, "min_tick_interval_ms must be positive");
        Ok(())
    }
}
