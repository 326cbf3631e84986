//! Arena configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Largest grid accepted, in cells
pub const MAX_CELLS: i64 = 1 << 24;

/// Arena configuration. Defaults are the reference game: 30 agents on a
/// 20x20 grid, safe zone closing every 8 rounds after round 10.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Grid columns
    pub width: i32,
    /// Grid rows
    pub height: i32,
    /// Agents placed at construction
    pub population: usize,
    /// Rounds before the safe zone starts closing
    pub shrink_start: u32,
    /// Rounds between successive rings closing
    pub shrink_every: u32,
    /// Random draws allowed per agent when looking for a free cell
    pub placement_attempts: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            population: 30,
            shrink_start: 10,
            shrink_every: 8,
            placement_attempts: 10_000,
        }
    }
}

impl ArenaConfig {
    /// Create config for a grid size with the default schedule
    pub fn new(width: i32, height: i32, population: usize) -> Self {
        Self {
            width,
            height,
            population,
            ..Default::default()
        }
    }

    /// Set the shrink schedule
    pub fn with_shrink(mut self, start: u32, every: u32) -> Self {
        self.shrink_start = start;
        self.shrink_every = every;
        self
    }

    /// Set the per-agent placement attempt bound
    pub fn with_placement_attempts(mut self, attempts: u32) -> Self {
        self.placement_attempts = attempts;
        self
    }

    /// Total number of cells
    pub fn cells(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// True if the safe zone closes one more ring on `round`
    pub fn shrinks_on_round(&self, round: u32) -> bool {
        self.shrink_every > 0
            && round > self.shrink_start
            && (round - self.shrink_start - 1) % self.shrink_every == 0
    }

    /// Reject configurations no arena can be built from
    pub fn validate(&self) -> Result<(), ArenaError> {
        self.validate_grid()?;
        if self.population == 0 {
            return Err(ArenaError::InvalidConfiguration(
                "population must be positive".to_string(),
            ));
        }
        if self.population > self.cells() {
            return Err(ArenaError::InvalidConfiguration(format!(
                "population {} does not fit on {} cells",
                self.population,
                self.cells()
            )));
        }
        Ok(())
    }

    /// Validate everything except the population
    pub fn validate_grid(&self) -> Result<(), ArenaError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ArenaError::InvalidConfiguration(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        let cells = self.width as i64 * self.height as i64;
        if cells > MAX_CELLS {
            return Err(ArenaError::InvalidConfiguration(format!(
                "grid {}x{} has {} cells, limit is {}",
                self.width, self.height, cells, MAX_CELLS
            )));
        }
        if self.shrink_every == 0 {
            return Err(ArenaError::InvalidConfiguration(
                "shrink period must be positive".to_string(),
            ));
        }
        if self.placement_attempts == 0 {
            return Err(ArenaError::InvalidConfiguration(
                "placement attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ArenaConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
