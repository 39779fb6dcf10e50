use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use super::grid::Grid;

/// Configuration for the game.
///
/// Fixed for the lifetime of an engine; there is no runtime reconfiguration.
/// Sizes are in pixels, the playfield is `width / cell_size` cells across.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of one grid cell
    pub cell_size: i32,
    /// Playfield width, a multiple of `cell_size`
    pub width: i32,
    /// Playfield height, a multiple of `cell_size`
    pub height: i32,
    /// Starting (and minimum) target length of the snake
    pub initial_snake_length: usize,
    /// Milliseconds between game ticks
    pub tick_interval_ms: u64,
    /// Score gained per food; the target length grows by the same amount
    pub score_per_food: u32,
    /// Minimum food distance from the head at spawn, in cell widths
    pub food_min_distance_cells: u32,
    /// Rejection-sampling budget before food falls back to the farthest cell
    pub max_food_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 6,
            width: 300,
            height: 600,
            initial_snake_length: 10,
            tick_interval_ms: 60,
            score_per_food: 2,
            food_min_distance_cells: 10,
            max_food_attempts: 10_000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom playfield size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// A 60x60 playfield (10x10 cells) for testing
    pub fn small() -> Self {
        Self::new(60, 60)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Reject configurations that would misalign the grid or stall the game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Playfield {
                width: self.width,
                height: self.height,
            });
        }
        if self.width % self.cell_size != 0 || self.height % self.cell_size != 0 {
            return Err(ConfigError::Misaligned {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::SnakeLength);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::TickInterval);
        }
        if self
            .food_min_distance_cells
            .checked_mul(self.cell_size as u32)
            .is_none_or(|px| px > i32::MAX as u32)
        {
            return Err(ConfigError::FoodDistance {
                cells: self.food_min_distance_cells,
            });
        }
        if self.max_food_attempts == 0 {
            return Err(ConfigError::FoodAttempts);
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.cell_size, self.width, self.height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Minimum food distance in pixels
    pub fn food_min_distance(&self) -> u32 {
        self.food_min_distance_cells
            .saturating_mul(self.cell_size.max(0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cell_size, 6);
        assert_eq!(config.width, 300);
        assert_eq!(config.height, 600);
        assert_eq!(config.initial_snake_length, 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(60));
        assert_eq!(config.food_min_distance(), 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(120, 90);
        assert_eq!(config.width, 120);
        assert_eq!(config.height, 90);
        assert_eq!(config.grid().columns(), 20);
        assert_eq!(config.grid().rows(), 15);
    }

    #[test]
    fn test_misaligned_playfield_rejected() {
        let config = GameConfig::new(301, 600);
        assert_eq!(
            config.validate(),
            Err(ConfigError::Misaligned {
                width: 301,
                height: 600,
                cell_size: 6
            })
        );
    }

    #[test]
    fn test_degenerate_values_rejected() {
        let zero_cell = GameConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert_eq!(zero_cell.validate(), Err(ConfigError::CellSize(0)));

        let empty = GameConfig::new(0, 600);
        assert!(matches!(empty.validate(), Err(ConfigError::Playfield { .. })));

        let no_snake = GameConfig {
            initial_snake_length: 0,
            ..Default::default()
        };
        assert_eq!(no_snake.validate(), Err(ConfigError::SnakeLength));

        let frozen = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(frozen.validate(), Err(ConfigError::TickInterval));

        let far_food = GameConfig {
            food_min_distance_cells: u32::MAX,
            ..Default::default()
        };
        assert_eq!(
            far_food.validate(),
            Err(ConfigError::FoodDistance { cells: u32::MAX })
        );
        assert_eq!(far_food.food_min_distance(), u32::MAX);

        let no_attempts = GameConfig {
            max_food_attempts: 0,
            ..Default::default()
        };
        assert_eq!(no_attempts.validate(), Err(ConfigError::FoodAttempts));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "width": 120, "height": 120, "score_per_food": 5 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.width, 120);
        assert_eq!(config.height, 120);
        assert_eq!(config.score_per_food, 5);
        assert_eq!(config.cell_size, 6);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::load(file.path()).is_err());
    }
}
