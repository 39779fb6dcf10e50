use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Grid, Position};

/// What occupies a grid cell when drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Body,
    Head,
    Food,
}

impl Tile {
    fn color(self) -> Color {
        match self {
            Tile::Empty => Color::Black,
            Tile::Body => Color::Green,
            Tile::Head => Color::Cyan,
            Tile::Food => Color::White,
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, grid: &Grid) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Playfield
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_title(state), chunks[0]);

        if state.is_alive() {
            frame.render_widget(self.render_grid(state, grid), chunks[1]);
        } else {
            frame.render_widget(self.render_game_over(state), chunks[1]);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Rasterise the playfield, one entry per cell in row-major order.
    fn tiles(&self, state: &GameState, grid: &Grid) -> Vec<Tile> {
        let columns = grid.columns();
        let mut tiles = vec![Tile::Empty; grid.cell_count()];
        let index = |pos: Position| {
            grid.contains(pos).then(|| {
                (pos.y / grid.cell_size) as usize * columns + (pos.x / grid.cell_size) as usize
            })
        };

        if let Some(i) = index(state.food) {
            tiles[i] = Tile::Food;
        }
        for &cell in state.snake.cells() {
            if let Some(i) = index(cell) {
                tiles[i] = Tile::Body;
            }
        }
        if let Some(i) = index(state.snake.head()) {
            tiles[i] = Tile::Head;
        }

        tiles
    }

    /// Two grid rows per terminal line: the upper half block takes the top
    /// row's colour as foreground and the bottom row's as background.
    fn render_grid(&self, state: &GameState, grid: &Grid) -> Paragraph<'_> {
        let columns = grid.columns();
        let rows = grid.rows();
        let tiles = self.tiles(state, grid);

        let lines: Vec<Line> = (0..rows)
            .step_by(2)
            .map(|top| {
                let spans: Vec<Span> = (0..columns)
                    .map(|x| {
                        let upper = tiles[top * columns + x];
                        let lower = if top + 1 < rows {
                            tiles[(top + 1) * columns + x]
                        } else {
                            Tile::Empty
                        };
                        Span::styled("▀", Style::default().fg(upper.color()).bg(lower.color()))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    /// The running score, shown where the window title used to be
    fn render_title(&self, state: &GameState) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Snek: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Game Over!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
