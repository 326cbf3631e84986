//! Game runner - drives an arena to the end
//!
//! Level 3 - Step-level implementation

use rand::Rng;
use serde::Serialize;

use rpsroyale_core::{Arena, TickOutcome, Weapon};

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameEnd {
    /// One weapon type left standing
    Winner { weapon: Weapon, survivors: usize },
    /// The last fights removed everybody
    WipedOut,
    /// Fewer than two agents and no tick was needed to decide it
    Inactive,
    /// Tick limit reached
    Unfinished,
}

impl GameEnd {
    pub fn weapon(&self) -> Option<Weapon> {
        match self {
            GameEnd::Winner { weapon, .. } => Some(*weapon),
            _ => None,
        }
    }
}

/// Summary of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub end: GameEnd,
    /// Ticks driven
    pub ticks: u32,
    /// Arena rounds (ticks without a winner)
    pub rounds: u32,
    /// Closed rings at the end
    pub bounds: u32,
}

/// Tick `arena` until a winner is returned, it goes inactive, or
/// `max_ticks` is reached. `on_tick` sees every outcome.
pub fn run_game<R, F>(arena: &mut Arena, rng: &mut R, max_ticks: u32, mut on_tick: F) -> GameRecord
where
    R: Rng + ?Sized,
    F: FnMut(&Arena, &TickOutcome),
{
    let mut ticks = 0;
    let mut end = GameEnd::Unfinished;

    while ticks < max_ticks {
        if !arena.is_active() {
            end = GameEnd::Inactive;
            break;
        }

        let outcome = arena.tick(rng);
        ticks += 1;
        on_tick(arena, &outcome);

        if let Some(roster) = &outcome.winner {
            end = match outcome.winning_weapon() {
                Some(weapon) => GameEnd::Winner {
                    weapon,
                    survivors: roster.len(),
                },
                None => GameEnd::WipedOut,
            };
            break;
        }
    }

    GameRecord {
        end,
        ticks,
        rounds: arena.round(),
        bounds: arena.bounds(),
    }
}
