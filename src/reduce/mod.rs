//! Homomorphic core reduction.
//!
//! A [`Reducer`] proposes a [`Retraction`] of a model onto a smaller
//! submodel it maps into. Repeating this until nothing shrinks yields the
//! core, which is unique up to isomorphism. Reducers are interchangeable:
//! whatever they return is validated before it is applied.

use crate::*;

mod backtrack;
mod failure;
mod passthrough;
mod retraction;

pub use backtrack::*;
pub use failure::*;
pub use passthrough::*;
pub use retraction::*;

/// Strategy for computing homomorphic cores.
pub trait Reducer: Send + Sync {
    /// An idempotent endomorphism of `model` whose image is its core.
    fn reduce(&self, model: &Model) -> Result<Retraction, ReductionFailure>;
}
