//! Text recording of a game, one grid snapshot per move.

mod movement_log;

pub use movement_log::MovementLog;
