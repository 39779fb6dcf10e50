//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it, and tests drive it directly with a seeded RNG.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, request_direction_change};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome, TickResult};
pub use error::ConfigError;
pub use food::{FoodPlacement, generate_food};
pub use grid::{Grid, Position, distance, snap_to_grid, wrap};
pub use state::{GameState, Lifecycle, Snake};
