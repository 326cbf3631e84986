//! RPS Royale Core - Simulation engine
//!
//! This crate provides the last-one-standing engine:
//! - Weapons in a Paper > Rock > Scissors > Paper cycle
//! - Grid geometry (positions and orthogonal directions)
//! - Agents and the shrinking safe zone clamp
//! - Arena construction, combat, movement and tick orchestration
//! - Grid snapshots for renderers

pub mod board;
pub mod weapon;
pub mod agent;
pub mod config;
pub mod error;
pub mod grid;
pub mod arena;

// Re-exports for convenient access
pub use board::{Direction, Position, DIRECTIONS};
pub use weapon::Weapon;
pub use agent::Agent;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use grid::Grid;
pub use arena::{Arena, TickOutcome};
