//! The input game: agents, states, observation partitions and moves.
//!
//! Everything here is validated once at construction and immutable after.

mod action;
mod agent;
mod error;
mod game;
mod partition;
mod state;

pub use action::*;
pub use agent::*;
pub use error::*;
pub use game::*;
pub use partition::*;
pub use state::*;
