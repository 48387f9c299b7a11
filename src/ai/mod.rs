//! Autopilot: decides the snake's direction every tick

mod navigator;

pub use navigator::{Decision, Navigator, PathKind};
