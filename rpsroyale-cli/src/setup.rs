//! Shared arena setup for commands
//!
//! Level 4 - Configuration and utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rpsroyale_core::ArenaConfig;

/// Arena options shared by every command
#[derive(Args, Clone, Debug)]
pub struct ArenaArgs {
    /// Arena config JSON file (flags below override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Grid columns
    #[arg(long)]
    pub width: Option<i32>,

    /// Grid rows
    #[arg(long)]
    pub height: Option<i32>,

    /// Number of agents
    #[arg(long)]
    pub population: Option<usize>,
}

impl ArenaArgs {
    /// Resolve the arena config: file (or defaults), then flag overrides
    pub fn resolve(&self) -> Result<ArenaConfig> {
        let mut config = match &self.config {
            Some(path) => ArenaConfig::load(path)
                .with_context(|| format!("Failed to load arena config: {}", path.display()))?,
            None => ArenaConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(population) = self.population {
            config.population = population;
        }

        config.validate().context("Invalid arena configuration")?;
        Ok(config)
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
