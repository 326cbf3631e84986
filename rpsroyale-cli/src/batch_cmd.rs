//! Batch command - run many games and compare weapons
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use rpsroyale_core::{Arena, ArenaConfig, Weapon};

use crate::runner::{run_game, GameEnd, GameRecord};
use crate::setup::{create_rng, ArenaArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BatchArgs {
    #[command(flatten)]
    pub arena: ArenaArgs,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Give up on a game after this many ticks
    #[arg(long, default_value = "10000")]
    pub max_ticks: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Aggregated batch results
#[derive(Clone, Debug, Default, Serialize)]
struct BatchResults {
    total_games: usize,
    paper_wins: usize,
    rock_wins: usize,
    scissors_wins: usize,
    wiped_out: usize,
    unfinished: usize,
    inactive: usize,
    avg_ticks: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run batch command
///
/// 1. Resolve the arena config
/// 2. Play every game in parallel, one seed per game
/// 3. Report results
pub fn run(args: BatchArgs, seed: Option<u64>) -> Result<()> {
    let config = args.arena.resolve()?;
    let base_seed = seed.unwrap_or_else(|| create_rng(None).gen());

    tracing::info!(
        "Starting batch: {} games, base seed {}, {}x{} grid, {} agents",
        args.games,
        base_seed,
        config.width,
        config.height,
        config.population
    );

    let records = play_games(&config, &args, base_seed)?;
    let results = compute_statistics(&records);

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_games(config: &ArenaConfig, args: &BatchArgs, base_seed: u64) -> Result<Vec<GameRecord>> {
    let progress = ProgressBar::new(args.games as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")
            .context("Invalid progress template")?,
    );

    let records = (0..args.games)
        .into_par_iter()
        .map(|game_index| {
            let seed = base_seed.wrapping_add(game_index as u64);
            let record = play_single_game(config, args.max_ticks, seed);
            progress.inc(1);
            record
        })
        .collect::<Result<Vec<_>>>();

    progress.finish_and_clear();
    records
}

fn report_results(results: &BatchResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(config: &ArenaConfig, max_ticks: u32, seed: u64) -> Result<GameRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut arena = Arena::new(config.clone(), &mut rng)
        .with_context(|| format!("Failed to build arena for seed {}", seed))?;

    let record = run_game(&mut arena, &mut rng, max_ticks, |_, _| {});
    tracing::debug!("Seed {}: {:?} after {} ticks", seed, record.end, record.ticks);
    Ok(record)
}

fn compute_statistics(records: &[GameRecord]) -> BatchResults {
    let wins = |weapon: Weapon| {
        records
            .iter()
            .filter(|r| r.end.weapon() == Some(weapon))
            .count()
    };

    let total_ticks: u64 = records.iter().map(|r| r.ticks as u64).sum();
    let avg_ticks = if records.is_empty() {
        0.0
    } else {
        total_ticks as f32 / records.len() as f32
    };

    BatchResults {
        total_games: records.len(),
        paper_wins: wins(Weapon::Paper),
        rock_wins: wins(Weapon::Rock),
        scissors_wins: wins(Weapon::Scissors),
        wiped_out: records.iter().filter(|r| r.end == GameEnd::WipedOut).count(),
        unfinished: records.iter().filter(|r| r.end == GameEnd::Unfinished).count(),
        inactive: records.iter().filter(|r| r.end == GameEnd::Inactive).count(),
        avg_ticks,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_text_results(results: &BatchResults) {
    let total = results.total_games;

    println!("\n=== Batch Results ===");
    println!("Total games:   {}", total);
    for (label, count) in [
        ("Paper wins:   ", results.paper_wins),
        ("Rock wins:    ", results.rock_wins),
        ("Scissors wins:", results.scissors_wins),
        ("Wiped out:    ", results.wiped_out),
        ("Unfinished:   ", results.unfinished),
        ("Inactive:     ", results.inactive),
    ] {
        println!("{} {} ({:.1}%)", label, count, percent(count, total));
    }
    println!("Avg ticks:     {:.1}", results.avg_ticks);
}
