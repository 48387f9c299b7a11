use thiserror::Error;

use crate::game::Position;

/// Fatal problems detected while setting up a game.
///
/// None of these are recoverable at runtime: they surface from
/// [`GameEngine::new`](crate::game::GameEngine::new) and abort the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("grid must be at least 4x4 including walls, got {rows}x{cols}")]
    GridTooSmall { rows: usize, cols: usize },

    #[error("grid shape not supported by the serpentine cycle: {0}")]
    UnsupportedShape(String),

    #[error("no two adjacent free cells to seed the covering cycle")]
    NoAdjacentFreeCells,

    #[error("covering path reaches {covered} of {free} free cells")]
    InfeasibleCovering { covered: usize, free: usize },

    #[error("cannot place snake segment at {0:?}")]
    InvalidSpawn(Position),
}

/// Invalid values in a [`GameConfig`](crate::game::GameConfig).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid game config: {0}")]
    Invalid(String),
}
