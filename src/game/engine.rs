use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::{Direction, request_direction_change},
    config::GameConfig,
    error::ConfigError,
    food::generate_food,
    grid::{Grid, Position},
    state::{GameState, Lifecycle, Snake},
};

/// What a tick did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No direction yet, nothing moved
    Idle,
    /// The snake moved and is still alive
    Continued,
    /// The snake ran into itself (now or on an earlier tick)
    GameOver { final_score: u32 },
}

/// Result of a game tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub outcome: TickOutcome,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the score changed, for refreshing the score display
    pub score_changed: bool,
}

impl TickResult {
    fn quiet(outcome: TickOutcome) -> Self {
        Self {
            outcome,
            ate_food: false,
            score_changed: false,
        }
    }

    /// Whether the game has terminated
    pub fn terminated(&self) -> bool {
        matches!(self.outcome, TickOutcome::GameOver { .. })
    }
}

/// The game engine that handles all game logic.
///
/// The engine holds the configuration and the random source; the state it
/// drives is owned by the caller.
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS entropy source
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine around any random source. The configuration is
    /// validated here so a misaligned grid never reaches the tick loop.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid();
        Ok(Self { config, grid, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Fresh session: a snake of the starting length stacked on the centre
    /// cell, and the first food.
    pub fn reset(&mut self) -> GameState {
        let start = self.grid.center();
        let snake = Snake::new(
            start,
            self.config.initial_snake_length,
            self.grid.cell_count(),
        );
        let food = self.spawn_food(start);

        info!(
            x = start.x,
            y = start.y,
            food_x = food.x,
            food_y = food.y,
            "new game"
        );

        GameState::new(snake, food)
    }

    /// Apply a directional input to the state and return the resulting heading.
    ///
    /// Takes effect on the next tick. Input after game over is ignored.
    pub fn request_direction_change(
        &self,
        state: &mut GameState,
        proposed: Direction,
    ) -> Option<Direction> {
        if state.is_alive() {
            state.direction = Some(request_direction_change(state.direction, proposed));
        }
        state.direction
    }

    /// Advance the game by one fixed timestep
    pub fn advance_tick(&mut self, state: &mut GameState) -> TickResult {
        if state.lifecycle == Lifecycle::GameOver {
            return TickResult::quiet(TickOutcome::GameOver {
                final_score: state.score,
            });
        }

        let Some(direction) = state.direction else {
            return TickResult::quiet(TickOutcome::Idle);
        };

        let new_head = self.grid.step(state.snake.head(), direction);

        // Checked against the whole body, including the tail that is about
        // to be trimmed this tick.
        if state.snake.occupies(new_head) {
            state.lifecycle = Lifecycle::GameOver;
            info!(
                score = state.score,
                ticks = state.ticks,
                x = new_head.x,
                y = new_head.y,
                "game over"
            );
            return TickResult::quiet(TickOutcome::GameOver {
                final_score: state.score,
            });
        }

        state.ticks += 1;

        let ate_food = new_head == state.food;
        if ate_food {
            state.score += self.config.score_per_food;
            state.snake.grow(self.config.score_per_food as usize);
            state.food = self.spawn_food(new_head);
            debug!(score = state.score, "food eaten");
        }

        state.snake.advance(new_head);

        TickResult {
            outcome: TickOutcome::Continued,
            ate_food,
            score_changed: ate_food && self.config.score_per_food > 0,
        }
    }

    fn spawn_food(&mut self, head: Position) -> Position {
        generate_food(
            &mut self.rng,
            &self.grid,
            head,
            self.config.food_min_distance(),
            self.config.max_food_attempts,
        )
        .position
    }
}
