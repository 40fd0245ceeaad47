use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest grid on which the start cell and the initial food cell differ
pub const MIN_GRID_SIZE: usize = 4;
pub const MAX_GRID_SIZE: usize = 200;

/// Configuration for the game
///
/// Every field has a default, so a config file only needs to name the
/// values it changes:
///
/// ```json
/// { "grid_size": 30, "tick_interval_ms": 80 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square grid, in cells
    pub grid_size: usize,
    /// Side of one cell in canvas units
    pub cell_size: u16,
    /// Time between two ticks
    pub tick_interval_ms: u64,
    /// Random draws tried before falling back to the free-cell set
    pub food_attempts: u32,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_size: 20,
            tick_interval_ms: 100,
            food_attempts: 100,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Same configuration with a fixed seed
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    /// Where the snake's single segment starts
    pub fn start_position(&self) -> (i32, i32) {
        let center = (self.grid_size / 2) as i32;
        (center, center)
    }

    /// Where the first food appears before any random placement
    pub fn initial_food(&self) -> (i32, i32) {
        let at = (self.grid_size * 3 / 4) as i32;
        (at, at)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(format!(
                "grid_size must be in [{}, {}], got {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE, self.grid_size
            ));
        }

        if self.cell_size < 4 {
            return Err(format!(
                "cell_size must be at least 4, got {}",
                self.cell_size
            ));
        }

        if self.tick_interval_ms < 10 {
            return Err(format!(
                "tick_interval_ms must be at least 10, got {}",
                self.tick_interval_ms
            ));
        }

        if self.food_attempts == 0 {
            return Err("food_attempts must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.tick_interval_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_layout_matches_classic_board() {
        let config = GameConfig::default();
        assert_eq!(config.start_position(), (10, 10));
        assert_eq!(config.initial_food(), (15, 15));
    }

    #[test]
    fn test_smallest_grid_keeps_start_and_food_apart() {
        let config = GameConfig::new(MIN_GRID_SIZE);
        assert!(config.validate().is_ok());
        assert_ne!(config.start_position(), config.initial_food());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(GameConfig::new(3).validate().is_err());
        assert!(GameConfig::new(201).validate().is_err());

        let config = GameConfig {
            cell_size: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            food_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"grid_size": 30}"#).unwrap();
        assert_eq!(config.grid_size, 30);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{"tick_interval_ms": 80, "seed": 7}"#).unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.tick_interval_ms, 80);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.grid_size, 20);
    }

    #[test]
    fn test_from_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GameConfig::from_file(&dir.path().join("nope.json")).is_err());
    }
}
