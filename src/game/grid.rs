use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the playfield, in pixel units.
///
/// Grid-aligned positions (cells) have both coordinates on a multiple of the
/// cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Floor each coordinate to the nearest lower multiple of `cell_size`.
pub fn snap_to_grid(pos: Position, cell_size: i32) -> Position {
    Position {
        x: pos.x.div_euclid(cell_size) * cell_size,
        y: pos.y.div_euclid(cell_size) * cell_size,
    }
}

/// Toroidal boundary correction, one crossing per axis.
///
/// Valid coordinates are `0..width` and `0..height`.
pub fn wrap(pos: Position, width: i32, height: i32) -> Position {
    let fold = |v: i32, bound: i32| {
        if v < 0 {
            v + bound
        } else if v >= bound {
            v - bound
        } else {
            v
        }
    };

    Position {
        x: fold(pos.x, width),
        y: fold(pos.y, height),
    }
}

/// Ceiling of the Euclidean distance between two positions.
pub fn distance(a: Position, b: Position) -> u32 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy).ceil() as u32
}

/// Playfield geometry: cell size and pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cell_size: i32,
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(cell_size: i32, width: i32, height: i32) -> Self {
        Self {
            cell_size,
            width,
            height,
        }
    }

    /// Number of cells across
    pub fn columns(&self) -> usize {
        (self.width / self.cell_size) as usize
    }

    /// Number of cells down
    pub fn rows(&self) -> usize {
        (self.height / self.cell_size) as usize
    }

    pub fn cell_count(&self) -> usize {
        self.columns() * self.rows()
    }

    pub fn snap(&self, pos: Position) -> Position {
        snap_to_grid(pos, self.cell_size)
    }

    /// Grid-aligned centre of the playfield
    pub fn center(&self) -> Position {
        self.snap(Position::new(self.width / 2, self.height / 2))
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// The cell one step away in `direction`, wrapped around the edges and
    /// snapped back onto the grid. Snapping happens after wrapping.
    pub fn step(&self, from: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        let moved = from.moved_by(dx * self.cell_size, dy * self.cell_size);
        self.snap(wrap(moved, self.width, self.height))
    }

    /// The cell with the largest distance from `pos`; always a corner.
    pub fn farthest_from(&self, pos: Position) -> Position {
        let last_x = self.width - self.cell_size;
        let last_y = self.height - self.cell_size;
        let x = if pos.x >= last_x - pos.x { 0 } else { last_x };
        let y = if pos.y >= last_y - pos.y { 0 } else { last_y };
        Position::new(x, y)
    }
}
