//! RPS Royale CLI - Command-line driver
//!
//! Commands:
//! - play: Run and render a single game
//! - batch: Run many games and report weapon win rates

mod batch_cmd;
mod play_cmd;
mod runner;
mod setup;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rpsroyale")]
#[command(about = "Rock-paper-scissors battle royale simulator")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run and render a single game
    Play(play_cmd::PlayArgs),
    /// Run many games and report results
    Batch(batch_cmd::BatchArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr so rendered boards stay on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Batch(args) => batch_cmd::run(args, cli.seed),
    }
}
