//! Core game logic module for Snake
//!
//! This module contains the board, the snake and the engine that drives a
//! game. It has no I/O or rendering dependencies, so the TUI, the headless
//! runner and the tests all share it.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use grid::{CellType, Grid, MIN_GRID_SIZE};
pub use state::{CollisionType, GameState, MoveOutcome, Position, Snake};
