//! Arena state, combat resolution and tick orchestration

use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::board::{Direction, Position};
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::grid::Grid;
use crate::weapon::Weapon;

// ============================================================================
// TICK OUTCOME
// ============================================================================

/// Result of one tick
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    /// Snapshot after the tick
    pub grid: Grid,
    /// Closed rings after the tick
    pub bounds: u32,
    /// Surviving roster when a single weapon type remains
    pub winner: Option<Vec<Agent>>,
}

impl TickOutcome {
    /// Check if this tick ended the game
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Weapon of the winning roster (None if no winner or nobody survived)
    pub fn winning_weapon(&self) -> Option<Weapon> {
        self.winner
            .as_ref()
            .and_then(|roster| roster.first())
            .map(|agent| agent.weapon)
    }
}

// ============================================================================
// ARENA
// ============================================================================

/// Full simulation state for one game
#[derive(Clone, Debug)]
pub struct Arena {
    config: ArenaConfig,

    /// Live roster in insertion order
    agents: Vec<Agent>,

    /// Ticks completed without a winner
    round: u32,

    /// Outer rings closed so far
    bounds: u32,
}

impl Arena {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Build an arena with `config.population` agents on random free cells.
    /// Weapons are assigned round-robin: Paper, Rock, Scissors, Paper, ...
    pub fn new<R: Rng + ?Sized>(config: ArenaConfig, rng: &mut R) -> Result<Self, ArenaError> {
        config.validate()?;

        let requested = config.population;
        let mut agents = Vec::with_capacity(requested);
        let mut occupied = FxHashSet::default();

        for i in 0..requested {
            let position = random_free_cell(&config, &occupied, rng).ok_or(
                ArenaError::PlacementExhausted {
                    placed: i,
                    requested,
                    attempts: config.placement_attempts,
                },
            )?;
            occupied.insert(position);
            agents.push(Agent {
                weapon: Weapon::from_index(i),
                position,
                defeated: false,
            });
        }

        tracing::debug!(
            "Arena {}x{} created with {} agents",
            config.width,
            config.height,
            agents.len()
        );

        Ok(Self {
            config,
            agents,
            round: 0,
            bounds: 0,
        })
    }

    /// Build an arena from an explicit roster. `config.population` is
    /// replaced by the roster size; defeated agents are dropped.
    pub fn with_agents(mut config: ArenaConfig, agents: Vec<Agent>) -> Result<Self, ArenaError> {
        config.validate_grid()?;

        let agents: Vec<Agent> = agents.into_iter().filter(|a| !a.defeated).collect();
        let mut occupied = FxHashSet::default();
        for agent in &agents {
            if !agent.position.in_grid(config.width, config.height) {
                return Err(ArenaError::InvalidConfiguration(format!(
                    "agent at ({}, {}) is off the {}x{} grid",
                    agent.x(),
                    agent.y(),
                    config.width,
                    config.height
                )));
            }
            if !occupied.insert(agent.position) {
                return Err(ArenaError::InvalidConfiguration(format!(
                    "two agents share cell ({}, {})",
                    agent.x(),
                    agent.y()
                )));
            }
        }

        config.population = agents.len();
        Ok(Self {
            config,
            agents,
            round: 0,
            bounds: 0,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.config.width
    }

    pub fn height(&self) -> i32 {
        self.config.height
    }

    /// Live roster
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Ticks completed without a winner
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Closed outer rings
    pub fn bounds(&self) -> u32 {
        self.bounds
    }

    /// More than one agent left
    pub fn is_active(&self) -> bool {
        self.agents.len() > 1
    }

    /// Fresh snapshot of the live roster
    pub fn grid(&self) -> Grid {
        Grid::from_agents(self.config.width, self.config.height, &self.agents)
    }

    /// True unless the closed rings cover `pos`
    pub fn in_safe_zone(&self, pos: Position) -> bool {
        pos.in_safe_zone(self.bounds, self.config.width, self.config.height)
    }

    /// Survivors per weapon, in `Weapon::ALL` order
    pub fn weapon_counts(&self) -> [(Weapon, usize); 3] {
        Weapon::ALL.map(|w| (w, self.agents.iter().filter(|a| a.weapon == w).count()))
    }

    // ========================================================================
    // TICK
    // ========================================================================

    /// Advance one step: combat, counters, movement.
    ///
    /// When combat leaves a single weapon type the tick stops there and
    /// neither counter nor any position changes.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        if let Some(winner) = self.resolve_combat() {
            tracing::info!(
                "Round {}: {} wins with {} survivors",
                self.round,
                winner
                    .first()
                    .map(|a| a.weapon.to_string())
                    .unwrap_or_else(|| "nobody".to_string()),
                winner.len()
            );
            return TickOutcome {
                grid: self.grid(),
                bounds: self.bounds,
                winner: Some(winner),
            };
        }

        self.round += 1;
        if self.config.shrinks_on_round(self.round) {
            self.bounds += 1;
            tracing::info!("Round {}: safe zone shrinks to bounds {}", self.round, self.bounds);
        }

        self.move_agents(rng);

        tracing::debug!(
            "Round {}: {} agents, bounds {}",
            self.round,
            self.agents.len(),
            self.bounds
        );

        TickOutcome {
            grid: self.grid(),
            bounds: self.bounds,
            winner: None,
        }
    }

    // ========================================================================
    // COMBAT
    // ========================================================================

    /// Fight every orthogonally adjacent pair once, drop the losers, and
    /// return the roster if only one weapon type is left.
    ///
    /// Each pair is judged on weapons alone, so an agent already marked
    /// still defeats its own prey in the same sweep.
    fn resolve_combat(&mut self) -> Option<Vec<Agent>> {
        let by_cell: FxHashMap<Position, usize> = self
            .agents
            .iter()
            .enumerate()
            .map(|(i, a)| (a.position, i))
            .collect();

        // Right and Down neighbours visit each unordered pair exactly once
        for i in 0..self.agents.len() {
            let pos = self.agents[i].position;
            for direction in [Direction::Right, Direction::Down] {
                let (dx, dy) = direction.vector();
                let Some(&j) = by_cell.get(&Position::new(pos.x + dx, pos.y + dy)) else {
                    continue;
                };
                let (a, b) = (self.agents[i].weapon, self.agents[j].weapon);
                if a.beats(b) {
                    self.agents[j].defeated = true;
                } else if b.beats(a) {
                    self.agents[i].defeated = true;
                }
            }
        }

        let before = self.agents.len();
        self.agents.retain(|a| !a.defeated);
        let eliminated = before - self.agents.len();
        if eliminated > 0 {
            tracing::debug!("Round {}: {} agents eliminated", self.round, eliminated);
        }

        let first = self.agents.first().map(|a| a.weapon);
        if self.agents.iter().all(|a| Some(a.weapon) == first) {
            Some(self.agents.clone())
        } else {
            None
        }
    }

    // ========================================================================
    // MOVEMENT
    // ========================================================================

    /// Move each agent one random step in roster order. A step onto an
    /// occupied cell is skipped.
    fn move_agents<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (width, height, bounds) = (self.config.width, self.config.height, self.bounds);
        let mut occupied: FxHashSet<Position> = self.agents.iter().map(|a| a.position).collect();

        for agent in &mut self.agents {
            let direction = Direction::random(rng);

            // The closing zone is shown, not enforced
            let clamped = agent.clamped_position(bounds, width, height);
            if clamped != agent.position {
                tracing::trace!(
                    "{} at ({}, {}) is outside the safe zone",
                    agent.weapon,
                    agent.x(),
                    agent.y()
                );
            }

            let dest = agent.position.step_within(direction, width, height);
            if dest == agent.position {
                continue;
            }
            if occupied.contains(&dest) {
                tracing::trace!(
                    "{} at ({}, {}) blocked moving {:?}",
                    agent.weapon,
                    agent.x(),
                    agent.y(),
                    direction
                );
                continue;
            }

            occupied.remove(&agent.position);
            occupied.insert(dest);
            agent.position = dest;
        }
    }
}

/// Draw random cells until a free one turns up or the attempt bound runs out
fn random_free_cell<R: Rng + ?Sized>(
    config: &ArenaConfig,
    occupied: &FxHashSet<Position>,
    rng: &mut R,
) -> Option<Position> {
    (0..config.placement_attempts)
        .map(|_| {
            Position::new(
                rng.gen_range(0..config.width),
                rng.gen_range(0..config.height),
            )
        })
        .find(|pos| !occupied.contains(pos))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn arena_with(agents: Vec<Agent>) -> Arena {
        Arena::with_agents(ArenaConfig::default(), agents).unwrap()
    }

    fn assert_unique_cells(arena: &Arena) {
        let cells: FxHashSet<Position> = arena.agents().iter().map(|a| a.position).collect();
        assert_eq!(cells.len(), arena.agents().len(), "two agents share a cell");
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    #[test]
    fn test_new_places_reference_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let arena = Arena::new(ArenaConfig::default(), &mut rng).unwrap();

        assert_eq!(arena.agents().len(), 30);
        assert_eq!(arena.round(), 0);
        assert_eq!(arena.bounds(), 0);
        assert_unique_cells(&arena);
        assert!(arena.agents().iter().all(|a| a.position.in_grid(20, 20)));
        assert_eq!(
            arena.weapon_counts(),
            [(Weapon::Paper, 10), (Weapon::Rock, 10), (Weapon::Scissors, 10)]
        );
    }

    #[test]
    fn test_new_fills_whole_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let arena = Arena::new(ArenaConfig::new(3, 3, 9), &mut rng).unwrap();
        assert_eq!(arena.grid().occupied(), 9);
    }

    #[test]
    fn test_new_rejects_overpopulation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = Arena::new(ArenaConfig::new(2, 2, 5), &mut rng).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_new_reports_placement_exhausted() {
        // Always draws cell (0, 0)
        let mut rng = StepRng::new(0, 0);
        let config = ArenaConfig::new(4, 4, 2).with_placement_attempts(50);
        let err = Arena::new(config, &mut rng).unwrap_err();
        match err {
            ArenaError::PlacementExhausted { placed, requested, attempts } => {
                assert_eq!(placed, 1);
                assert_eq!(requested, 2);
                assert_eq!(attempts, 50);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_with_agents_takes_roster_size() {
        let mut dead = Agent::new(Weapon::Scissors, 2, 2);
        dead.defeated = true;
        let arena = arena_with(vec![
            Agent::new(Weapon::Paper, 0, 0),
            Agent::new(Weapon::Rock, 5, 5),
            dead,
        ]);
        assert_eq!(arena.config().population, 2);
        assert_eq!(arena.agents().len(), 2);
        assert_eq!(arena.config().shrink_every, 8);
    }

    #[test]
    fn test_with_agents_rejects_shared_cell() {
        let err = Arena::with_agents(
            ArenaConfig::default(),
            vec![Agent::new(Weapon::Paper, 1, 1), Agent::new(Weapon::Rock, 1, 1)],
        )
        .unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_with_agents_rejects_off_grid() {
        let err = Arena::with_agents(
            ArenaConfig::default(),
            vec![Agent::new(Weapon::Paper, 20, 0)],
        )
        .unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfiguration(_)));
    }

    // ------------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------------

    #[test]
    fn test_adjacent_pair_loser_removed() {
        for attacker in Weapon::ALL {
            let prey = attacker.prey();
            let mut arena = arena_with(vec![
                Agent::new(prey, 4, 4),
                Agent::new(attacker, 4, 5),
            ]);
            let winner = arena.resolve_combat().expect("one weapon left");
            assert_eq!(winner, vec![Agent::new(attacker, 4, 5)]);
            assert_eq!(arena.agents().len(), 1);
        }
    }

    #[test]
    fn test_same_weapon_both_survive() {
        let mut arena = arena_with(vec![
            Agent::new(Weapon::Rock, 4, 4),
            Agent::new(Weapon::Rock, 5, 4),
        ]);
        let winner = arena.resolve_combat().expect("single weapon type");
        assert_eq!(winner.len(), 2);
    }

    #[test]
    fn test_diagonal_does_not_fight() {
        let mut arena = arena_with(vec![
            Agent::new(Weapon::Paper, 4, 4),
            Agent::new(Weapon::Rock, 5, 5),
        ]);
        assert!(arena.resolve_combat().is_none());
        assert_eq!(arena.agents().len(), 2);
    }

    #[test]
    fn test_marked_agent_still_wins_its_pairs() {
        // P beats R, R beats S: both R and S fall in the same sweep
        for roster in [
            vec![
                Agent::new(Weapon::Paper, 0, 0),
                Agent::new(Weapon::Rock, 1, 0),
                Agent::new(Weapon::Scissors, 2, 0),
            ],
            vec![
                Agent::new(Weapon::Scissors, 2, 0),
                Agent::new(Weapon::Rock, 1, 0),
                Agent::new(Weapon::Paper, 0, 0),
            ],
        ] {
            let mut arena = arena_with(roster);
            let winner = arena.resolve_combat().expect("paper alone");
            assert_eq!(winner, vec![Agent::new(Weapon::Paper, 0, 0)]);
        }
    }

    #[test]
    fn test_empty_roster_is_vacuous_winner() {
        let mut arena = arena_with(vec![]);
        assert_eq!(arena.resolve_combat(), Some(vec![]));
        assert!(!arena.is_active());
    }

    // ------------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------------

    #[test]
    fn test_winner_tick_freezes_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut arena = arena_with(vec![
            Agent::new(Weapon::Paper, 5, 5),
            Agent::new(Weapon::Rock, 5, 6),
        ]);

        let outcome = arena.tick(&mut rng);
        assert_eq!(outcome.winning_weapon(), Some(Weapon::Paper));
        assert_eq!(outcome.winner, Some(vec![Agent::new(Weapon::Paper, 5, 5)]));
        assert_eq!(arena.round(), 0);
        assert_eq!(outcome.bounds, 0);
        assert_eq!(outcome.grid.get(5, 5), Some(Weapon::Paper));
        assert_eq!(outcome.grid.get(5, 6), None);
    }

    #[test]
    fn test_tick_moves_at_most_one_step() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut arena = arena_with(vec![
            Agent::new(Weapon::Paper, 0, 0),
            Agent::new(Weapon::Rock, 10, 10),
        ]);

        let outcome = arena.tick(&mut rng);
        assert!(outcome.winner.is_none());
        assert_eq!(arena.round(), 1);

        let paper = arena.agents()[0];
        let rock = arena.agents()[1];
        let dist = |a: Position, b: Position| (a.x - b.x).abs() + (a.y - b.y).abs();
        assert!(dist(paper.position, Position::new(0, 0)) <= 1);
        assert!(dist(rock.position, Position::new(10, 10)) <= 1);
        assert_eq!(outcome.grid.occupied(), 2);
    }

    #[test]
    fn test_blocked_move_stays_put() {
        // Every cell around the centre agent is taken by a same-weapon agent
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut agents = vec![Agent::new(Weapon::Rock, 1, 1)];
        for (x, y) in [(0, 1), (2, 1), (1, 0), (1, 2), (0, 0), (2, 0), (0, 2), (2, 2)] {
            agents.push(Agent::new(Weapon::Rock, x, y));
        }
        agents.push(Agent::new(Weapon::Paper, 9, 9));
        let config = ArenaConfig::new(10, 10, 1);
        let mut arena = Arena::with_agents(config, agents).unwrap();

        arena.move_agents(&mut rng);
        assert_eq!(arena.agents()[0].position, Position::new(1, 1));
        assert_unique_cells(&arena);
    }

    #[test]
    fn test_closed_ring_does_not_pull_agents_inward() {
        // Draws 0 every time: every agent steps Up
        let mut rng = StepRng::new(0, 0);
        let mut arena = arena_with(vec![
            Agent::new(Weapon::Rock, 0, 5),
            Agent::new(Weapon::Paper, 10, 10),
        ]);
        arena.bounds = 2;
        assert!(!arena.in_safe_zone(Position::new(0, 5)));
        assert_eq!(
            arena.agents()[0].clamped_position(arena.bounds(), arena.width(), arena.height()),
            Position::new(3, 5)
        );

        arena.move_agents(&mut rng);
        assert_eq!(arena.agents()[0].position, Position::new(0, 4));
        assert_eq!(arena.agents()[1].position, Position::new(10, 9));
    }

    #[test]
    fn test_shrink_schedule_across_ticks() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let config = ArenaConfig::new(60, 60, 1);
        let mut arena = Arena::with_agents(
            config,
            vec![Agent::new(Weapon::Paper, 0, 0), Agent::new(Weapon::Rock, 59, 59)],
        )
        .unwrap();

        let mut last_bounds = 0;
        for _ in 0..30 {
            let outcome = arena.tick(&mut rng);
            assert!(outcome.winner.is_none());
            let round = arena.round();
            let expected = last_bounds + u32::from(round > 10 && (round - 11) % 8 == 0);
            assert_eq!(outcome.bounds, expected, "round {round}");
            last_bounds = outcome.bounds;
        }
        assert_eq!(arena.round(), 30);
        // Closed on rounds 11, 19, 27
        assert_eq!(arena.bounds(), 3);
    }

    #[test]
    fn test_is_active() {
        assert!(arena_with(vec![
            Agent::new(Weapon::Paper, 0, 0),
            Agent::new(Weapon::Paper, 3, 3),
        ])
        .is_active());
        assert!(!arena_with(vec![Agent::new(Weapon::Paper, 0, 0)]).is_active());
    }
}
