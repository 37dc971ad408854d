//! Grid Snake - a terminal Snake game with a progressive levels mode
//!
//! This library provides:
//! - Core game logic: board, snake, food, levels, per-tick engine (game module)
//! - The real-time state machine and end-of-life animation (game_loop module)
//! - Keyboard translation and shared controls (input module)
//! - TUI rendering (render module)
//! - The terminal play mode (modes module)

pub mod game;
pub mod game_loop;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod prompt;
pub mod render;
