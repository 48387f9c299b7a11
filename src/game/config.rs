use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::grid::MIN_GRID_SIZE;
use crate::cycle::CycleStrategy;
use crate::error::ConfigError;

/// Configuration for the game
///
/// Grid dimensions include the boundary walls, so a 20x20 grid has an 18x18
/// playing field. Every field may be omitted from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rows of the game grid, walls included
    pub grid_rows: usize,
    /// Number of columns of the game grid, walls included
    pub grid_cols: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// How the covering cycle is built
    pub cycle_strategy: CycleStrategy,
    /// Let the navigator steer
    pub autopilot: bool,
    /// Time between two moves
    pub move_interval_ms: u64,
    /// Render frames per second
    pub fps: f64,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
    /// Write a grid snapshot to this file after every move
    pub record_movements: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_rows: 20,
            grid_cols: 20,
            initial_snake_length: 3,
            cycle_strategy: CycleStrategy::default(),
            autopilot: true,
            move_interval_ms: 30,
            fps: 30.0,
            seed: None,
            record_movements: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid_rows: rows,
            grid_cols: cols,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse game config")
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Check that all values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_rows < MIN_GRID_SIZE || self.grid_cols < MIN_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least {MIN_GRID_SIZE}x{MIN_GRID_SIZE}, got {}x{}",
                self.grid_rows, self.grid_cols
            )));
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::Invalid(
                "initial_snake_length must be at least 1".to_string(),
            ));
        }
        if self.move_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "move_interval_ms must be positive".to_string(),
            ));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        Ok(())
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_rows, 20);
        assert_eq!(config.grid_cols, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.cycle_strategy, CycleStrategy::LongestPath);
        assert!(config.autopilot);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_rows, 15);
        assert_eq!(config.grid_cols, 12);
        assert_eq!(GameConfig::small().grid_rows, 10);
        assert_eq!(GameConfig::large().grid_cols, 30);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            grid_rows = 8
            cycle_strategy = "serpentine"
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.grid_rows, 8);
        assert_eq!(config.grid_cols, 20);
        assert_eq!(config.cycle_strategy, CycleStrategy::Serpentine);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.record_movements, None);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("game.toml");
        let original = GameConfig {
            seed: Some(42),
            record_movements: Some(PathBuf::from("moves.txt")),
            ..GameConfig::new(12, 14)
        };
        std::fs::write(&path, toml::to_string(&original).unwrap()).unwrap();

        let loaded = GameConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(GameConfig::load(&temp_dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_validation() {
        assert!(GameConfig::new(3, 10).validate().is_err());
        assert!(GameConfig {
            initial_snake_length: 0,
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(GameConfig {
            fps: 0.0,
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(GameConfig {
            move_interval_ms: 0,
            ..Default::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_intervals() {
        let config = GameConfig::default();
        assert_eq!(config.move_interval(), Duration::from_millis(30));
        assert!(config.frame_interval() > Duration::from_millis(33));
        assert!(config.frame_interval() < Duration::from_millis(34));
    }
}
