//! Weapon types and the dominance cycle

use std::fmt;

use serde::{Deserialize, Serialize};

/// Weapon held by an agent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    Paper,
    Rock,
    Scissors,
}

impl Weapon {
    /// All weapons in assignment order
    pub const ALL: [Weapon; 3] = [Weapon::Paper, Weapon::Rock, Weapon::Scissors];

    /// Round-robin weapon for the i-th agent
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The weapon this one defeats
    pub fn prey(self) -> Self {
        match self {
            Weapon::Paper => Weapon::Rock,
            Weapon::Rock => Weapon::Scissors,
            Weapon::Scissors => Weapon::Paper,
        }
    }

    /// True if `self` defeats `other`
    pub fn beats(self, other: Weapon) -> bool {
        self.prey() == other
    }

    /// Single-character symbol used on the grid
    pub fn symbol(self) -> char {
        match self {
            Weapon::Paper => 'P',
            Weapon::Rock => 'R',
            Weapon::Scissors => 'S',
        }
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
