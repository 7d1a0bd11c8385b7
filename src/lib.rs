//! Epistemic unfolding of imperfect-information games up to homomorphic cores.
//!
//! A [`Game`] of several agents with partial observation is explored from its
//! initial state. At every point of play the joint knowledge of the agents is
//! captured by a multi-agent Kripke [`Model`], reduced to its homomorphic core
//! by a pluggable [`Reducer`], and keyed by a canonical [`Signature`]. Points
//! of play that share a knowledge structure collapse onto a single node of the
//! resulting [`UnfoldedGame`].

mod dot;
mod epistemic;
mod game;
mod load;
mod reduce;
mod unfold;

#[cfg(any(test, feature = "benchmark"))]
pub mod fixtures;

pub use dot::*;
pub use epistemic::*;
pub use game::*;
pub use load::*;
pub use reduce::*;
pub use unfold::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Index of an agent, in declaration order.
pub type AgentId = usize;
/// Index of an action within one agent's alphabet.
pub type ActionId = usize;
/// Index of a declared game state.
pub type StateId = usize;
/// Index of a world inside one epistemic model.
pub type WorldId = usize;
/// Index of an explored point of play in the context arena.
pub type ContextId = usize;
/// Index of a node of the unfolded game.
pub type UnfoldedId = usize;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// EXPLORATION PARAMETERS
// ============================================================================
/// Default cap on explored contexts and registered unfolded states.
pub const EXPLORATION_LIMIT: usize = 1 << 16;
/// Default number of search steps one core reduction may spend.
pub const REDUCTION_BUDGET: usize = 1 << 16;
/// Interval between progress log messages during exploration.
pub const PROGRESS_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10);

// ============================================================================
// RANDOM GAME SHAPE
// Upper bounds for `Game::random()`. Small on purpose: property tests unfold
// many of these.
// ============================================================================
/// Most agents in a random game.
pub const ARBITRARY_AGENTS: usize = 2;
/// Most actions per agent in a random game.
pub const ARBITRARY_ACTIONS: usize = 2;
/// Most states in a random game.
pub const ARBITRARY_STATES: usize = 5;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging at the given level.
/// Unlike the engine itself, this is only available to binaries.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term])
}
