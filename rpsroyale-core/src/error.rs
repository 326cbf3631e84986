//! Arena construction errors

/// Errors raised while building an arena. Ticks never fail.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// No free cell was found for an agent within the attempt bound
    #[error("placement exhausted: placed {placed} of {requested} agents, gave up after {attempts} attempts")]
    PlacementExhausted {
        placed: usize,
        requested: usize,
        attempts: u32,
    },

    /// Dimensions, population or roster that cannot form an arena
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
