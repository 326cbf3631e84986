//! Grid snapshots for renderers

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::board::Position;
use crate::weapon::Weapon;

/// Symbol for an empty cell inside the safe zone
pub const EMPTY_SYMBOL: char = '.';
/// Symbol for an empty cell outside the safe zone
pub const CLOSED_SYMBOL: char = '#';

/// A height x width table of weapons, rebuilt on every query
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Row-major cells
    cells: Vec<Option<Weapon>>,
}

impl Grid {
    /// Empty grid
    pub fn empty(width: i32, height: i32) -> Self {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            cells: vec![None; len],
        }
    }

    /// Snapshot of every live agent
    pub fn from_agents<'a>(width: i32, height: i32, agents: impl IntoIterator<Item = &'a Agent>) -> Self {
        let mut grid = Self::empty(width, height);
        for agent in agents.into_iter().filter(|a| !a.defeated) {
            if let Some(i) = grid.index(agent.position) {
                grid.cells[i] = Some(agent.weapon);
            }
        }
        grid
    }

    /// Weapon at (x, y), None if empty or off the grid
    pub fn get(&self, x: i32, y: i32) -> Option<Weapon> {
        self.index(Position::new(x, y)).and_then(|i| self.cells[i])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Weapon>]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Text rendering, one line per row. Cells outside the safe zone
    /// left by `bounds` are drawn with `CLOSED_SYMBOL` when empty.
    pub fn render(&self, bounds: u32) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2 + self.height.max(0) as usize);
        for (y, row) in self.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let ch = match cell {
                    Some(w) => w.symbol(),
                    None if pos.in_safe_zone(bounds, self.width, self.height) => EMPTY_SYMBOL,
                    None => CLOSED_SYMBOL,
                };
                out.push(ch);
                if x + 1 < row.len() {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.in_grid(self.width, self.height) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }
}
