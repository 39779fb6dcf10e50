use thiserror::Error;

/// Reasons a [`GameConfig`](super::GameConfig) is refused at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    CellSize(i32),

    #[error("playfield must be positive in both dimensions, got {width}x{height}")]
    Playfield { width: i32, height: i32 },

    #[error("playfield {width}x{height} is not divisible by cell size {cell_size}")]
    Misaligned {
        width: i32,
        height: i32,
        cell_size: i32,
    },

    #[error("starting snake length must be at least 1")]
    SnakeLength,

    #[error("tick interval must be non-zero")]
    TickInterval,

    #[error("food distance of {cells} cells does not fit in pixel coordinates")]
    FoodDistance { cells: u32 },

    #[error("food placement needs at least one attempt")]
    FoodAttempts,
}
