//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The async driver in [`crate::game_loop`] sequences it in time.

pub mod action;
pub mod board;
pub mod config;
pub mod effects;
pub mod engine;
pub mod food;
pub mod levels;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, InputEvent};
pub use board::{BoundsError, Board, CellColor};
pub use config::{Difficulty, GameConfig, ParseDifficultyError};
pub use engine::{GameEngine, TickOutcome};
pub use food::{FoodSpawner, NoSpaceError};
pub use levels::{LevelManager, LevelUp};
pub use state::{CollisionType, GameState, Position, Snake};
