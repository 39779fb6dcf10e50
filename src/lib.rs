//! Snek - a grid snake game
//!
//! This library provides:
//! - Core game logic (game module): grid geometry, the tick engine, food placement
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - The interactive session loop (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
