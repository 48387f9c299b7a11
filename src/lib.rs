//! Hamilton Snake - a snake game that plays itself
//!
//! This library provides:
//! - Core game logic (game module)
//! - Grid path searches (search module)
//! - Hamiltonian cycle construction (cycle module)
//! - The per-tick autopilot policy (ai module)
//! - TUI rendering, keyboard input and the execution modes (play, headless, search demo)

pub mod ai;
pub mod cycle;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod record;
pub mod render;
pub mod search;
