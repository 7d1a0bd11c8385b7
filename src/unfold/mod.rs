//! Exploration of a [`Game`] into its epistemic unfolding.

mod arena;
mod config;
mod engine;
mod error;
mod metrics;
mod registry;
mod unfolded;

pub use arena::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use metrics::*;
pub use registry::*;
pub use unfolded::*;
