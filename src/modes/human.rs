use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::game::{GameConfig, GameEngine, GameState, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// How long the game-over screen stays up before the session ends
const GAME_OVER_LINGER: Duration = Duration::from_secs(3);

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    game_over_at: Option<Instant>,
}

impl HumanMode {
    /// Build a session. With a seed, food placement is reproducible.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        }
        .context("Invalid game configuration")?;
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            game_over_at: None,
        })
    }

    /// Final score, if the session ended in a collision
    pub fn final_score(&self) -> Option<u32> {
        (!self.state.is_alive()).then_some(self.state.score)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let grid = *self.engine.grid();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &grid);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if let Some(at) = self.game_over_at {
                if at.elapsed() >= GAME_OVER_LINGER {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.engine.request_direction_change(&mut self.state, direction);
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        if self.game_over_at.is_some() {
            return;
        }

        let result = self.engine.advance_tick(&mut self.state);

        if let TickOutcome::GameOver { final_score } = result.outcome {
            info!(final_score, "session over");
            self.game_over_at = Some(Instant::now());
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Lifecycle, Position, Snake};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), Some(1)).unwrap();
        assert!(mode.state.is_alive());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.final_score(), None);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        assert!(HumanMode::new(GameConfig::new(100, 100), Some(1)).is_err());
    }

    #[test]
    fn test_keys_turn_immediately() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1)).unwrap();

        mode.handle_event(key(KeyCode::Right));
        assert_eq!(mode.state.direction, Some(Direction::Right));

        // Two quick turns before a tick are both applied.
        mode.handle_event(key(KeyCode::Up));
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.state.direction, Some(Direction::Left));

        mode.handle_event(key(KeyCode::Right));
        assert_eq!(mode.state.direction, Some(Direction::Left));

        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_game_over_starts_linger() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1)).unwrap();
        mode.state.snake = Snake::from_cells(
            [
                Position::new(0, 0),
                Position::new(0, 6),
                Position::new(6, 6),
                Position::new(6, 0),
            ],
            4,
        );
        mode.state.food = Position::new(120, 120);
        mode.state.score = 8;
        mode.state.direction = Some(Direction::Left);

        mode.update_game();

        assert_eq!(mode.state.lifecycle, Lifecycle::GameOver);
        assert!(mode.game_over_at.is_some());
        assert_eq!(mode.final_score(), Some(8));
    }
}
