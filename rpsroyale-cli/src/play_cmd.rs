//! Play command - run and render a single game
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_arena(), run_game(), report_result()
//! - Level 3: render_frame()
//! - Level 4: formatting utilities

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use rpsroyale_core::{Arena, TickOutcome};

use crate::runner::{run_game, GameEnd, GameRecord};
use crate::setup::{create_rng, ArenaArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub arena: ArenaArgs,

    /// Pause between ticks in milliseconds
    #[arg(long, default_value = "200")]
    pub delay_ms: u64,

    /// Give up after this many ticks
    #[arg(long, default_value = "10000")]
    pub max_ticks: u32,

    /// Skip frames and print a JSON summary
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the arena
/// 2. Tick it to the end, rendering every frame
/// 3. Report the result
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = args.arena.resolve()?;
    let mut rng = create_rng(seed);
    let mut arena = Arena::new(config, &mut rng).context("Failed to build arena")?;

    tracing::info!(
        "Starting game: {}x{} grid, {} agents",
        arena.width(),
        arena.height(),
        arena.agents().len()
    );

    if !args.json {
        print!("{}", arena.grid().render(arena.bounds()));
    }

    let delay = Duration::from_millis(args.delay_ms);
    let record = run_game(&mut arena, &mut rng, args.max_ticks, |arena, outcome| {
        if !args.json {
            render_frame(arena, outcome);
            if !outcome.is_over() && !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    });

    report_result(&record, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn report_result(record: &GameRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("{}", describe_end(&record.end));
    println!("Rounds: {}  Bounds: {}", record.rounds, record.bounds);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn render_frame(arena: &Arena, outcome: &TickOutcome) {
    println!();
    println!(
        "Round {}  bounds {}  agents {}",
        arena.round(),
        outcome.bounds,
        arena.agents().len()
    );
    print!("{}", outcome.grid.render(outcome.bounds));
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn describe_end(end: &GameEnd) -> String {
    match end {
        GameEnd::Winner { weapon, survivors } => {
            format!("{} wins! ({} left standing)", weapon, survivors)
        }
        GameEnd::WipedOut => "Nobody survived.".to_string(),
        GameEnd::Inactive => "Not enough agents to fight.".to_string(),
        GameEnd::Unfinished => "Tick limit reached with no winner.".to_string(),
    }
}
