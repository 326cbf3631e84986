//! Agent records

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::weapon::Weapon;

/// A combatant on the grid. Agents carry no id; a live agent is
/// identified by its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub weapon: Weapon,
    pub position: Position,
    pub defeated: bool,
}

impl Agent {
    pub fn new(weapon: Weapon, x: i32, y: i32) -> Self {
        Self {
            weapon,
            position: Position::new(x, y),
            defeated: false,
        }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    /// Position snapped into the play area left after `bounds` rings have
    /// closed. Advisory only; the agent is not moved.
    ///
    /// With `bounds == 0` nothing has closed and the position is returned
    /// unchanged.
    pub fn clamped_position(&self, bounds: u32, width: i32, height: i32) -> Position {
        if bounds == 0 {
            return self.position;
        }
        let b = bounds as i32;
        Position::new(clamp_axis(self.position.x, b, width), clamp_axis(self.position.y, b, height))
    }
}

fn clamp_axis(v: i32, b: i32, size: i32) -> i32 {
    let v = if v <= b { b + 1 } else { v };
    if v >= size - b - 1 {
        size - b - 2
    } else {
        v
    }
}
