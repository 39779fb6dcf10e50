use std::collections::VecDeque;

use super::action::Direction;
use super::grid::Position;

/// The snake: a ring buffer of cells plus the length it is growing towards.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body cells, tail at the front, head at the back
    body: VecDeque<Position>,
    /// Length the body converges to through tail trimming
    target_len: usize,
}

impl Snake {
    /// A snake of `length` cells, all stacked on `head`.
    ///
    /// The stacked copies are evicted one per tick as the head moves away,
    /// so the body unrolls from `head` while the length stays put.
    /// `capacity` is the number of cells on the playfield, which bounds the
    /// body so the buffer never reallocates while ticking.
    pub fn new(head: Position, length: usize, capacity: usize) -> Self {
        let length = length.max(1);
        let mut body = VecDeque::with_capacity(capacity.max(length) + 1);
        body.extend(std::iter::repeat_n(head, length));
        Self {
            body,
            target_len: length,
        }
    }

    /// Build a snake from explicit cells, tail first.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Position>, target_len: usize) -> Self {
        let body: VecDeque<Position> = cells.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Self { body, target_len }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        // Never empty: constructors require a cell and trimming keeps the head.
        self.body[self.body.len() - 1]
    }

    /// Get the tail position (oldest segment)
    pub fn tail(&self) -> Position {
        self.body[0]
    }

    /// Cells from tail to head
    pub fn cells(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }

    /// Whether `pos` lies on any cell, tail included.
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn grow(&mut self, by: usize) {
        self.target_len += by;
    }

    /// Push a new head, then drop tail cells until the body fits the target length.
    pub fn advance(&mut self, new_head: Position) {
        self.body.push_back(new_head);
        while self.body.len() > self.target_len.max(1) {
            self.body.pop_front();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a session. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` until the first directional input
    pub direction: Option<Direction>,
    pub food: Position,
    pub score: u32,
    pub ticks: u32,
    pub lifecycle: Lifecycle,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position) -> Self {
        Self {
            snake,
            direction: None,
            food,
            score: 0,
            ticks: 0,
            lifecycle: Lifecycle::Running,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// The snake has not been given a direction yet
    pub fn is_idle(&self) -> bool {
        self.direction.is_none()
    }
}
