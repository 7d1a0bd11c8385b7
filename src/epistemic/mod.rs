//! Multi-agent Kripke models of joint knowledge.
//!
//! - [`Relation`]: one agent's indistinguishability over worlds
//! - [`Model`]: worlds colored by game state, one relation per agent,
//!   a designated actual world
//! - [`Context`]: a point of play, the residual structure left by the last move
//! - [`Folding`]: whether worlds are game states or histories of play
//! - [`Builder`]: closes a context into the model of what agents know there
//! - [`Signature`]: canonical key, equal exactly for isomorphic models

mod bisimulation;
mod builder;
mod canon;
mod context;
mod folding;
mod model;
mod relation;
mod signature;
mod visibility;

pub use builder::*;
pub use context::*;
pub use folding::*;
pub use model::*;
pub use relation::*;
pub use signature::*;
pub use visibility::*;
