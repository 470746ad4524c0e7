//! Board geometry and wrap-around topology

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Cell coordinates `(col, row)` on the board
pub type Position = IVec2;

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in cell space (rows grow downward)
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Fixed-size toroidal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "board must have at least one cell");
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Map a cell at most one step outside the board onto the opposite edge
    pub fn wrap(&self, mut pos: Position) -> Position {
        if pos.x < 0 {
            pos.x = self.width - 1;
        } else if pos.x >= self.width {
            pos.x = 0;
        }
        if pos.y < 0 {
            pos.y = self.height - 1;
        } else if pos.y >= self.height {
            pos.y = 0;
        }
        pos
    }

    /// Neighbor of `pos` one step in `dir`, wrapped
    pub fn step(&self, pos: Position, dir: Direction) -> Position {
        self.wrap(pos + dir.unit())
    }

    /// Manhattan distance on the torus
    pub fn wrapped_distance(&self, a: Position, b: Position) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        dx.min(self.width - dx) + dy.min(self.height - dy)
    }
}
