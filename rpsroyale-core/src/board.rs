//! Grid geometry with orthogonal directions

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Grid coordinate (x = column, y = row)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if this position is on a `width` x `height` grid
    pub fn in_grid(&self, width: i32, height: i32) -> bool {
        (0..width).contains(&self.x) && (0..height).contains(&self.y)
    }

    /// Orthogonally adjacent: one shared coordinate, the other differs by 1
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        (dx == 0 && dy == 1) || (dx == 1 && dy == 0)
    }

    /// True unless `bounds` closed rings cover this cell
    pub fn in_safe_zone(&self, bounds: u32, width: i32, height: i32) -> bool {
        let b = bounds as i32;
        !(self.x < b || self.x > width - b - 1 || self.y < b || self.y > height - b - 1)
    }

    /// One step in `direction`, held inside the grid edges
    pub fn step_within(&self, direction: Direction, width: i32, height: i32) -> Position {
        let (dx, dy) = direction.vector();
        Position::new(
            (self.x + dx).clamp(0, width - 1),
            (self.y + dy).clamp(0, height - 1),
        )
    }
}

/// Movement direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// Direction vectors (dx, dy)
/// Index: 0=Up, 1=Right, 2=Down, 3=Left
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, -1), // Up
    (1, 0),  // Right
    (0, 1),  // Down
    (-1, 0), // Left
];

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn vector(self) -> (i32, i32) {
        DIRECTIONS[self as usize]
    }

    /// Draw a direction uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}
