use crate::*;
use std::time::Duration;

/// When two points of play count as the same unfolded state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Equivalence {
    /// Isomorphic (reduced) models.
    #[default]
    Isomorphism,
    /// Bisimilar models. Coarser, and never larger than isomorphism.
    Bisimulation,
}

/// Knobs for one exploration run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reduce models to their homomorphic cores. Without it, exploration
    /// need not terminate and relies on `limit`.
    pub reduce: bool,
    /// Search steps one core reduction may spend.
    pub budget: Option<usize>,
    /// Wall-clock allowance for one core reduction.
    pub timeout: Option<Duration>,
    /// Cap on explored contexts and on unfolded states.
    pub limit: Option<usize>,
    /// Passes the model builder may run; unbounded by default.
    pub depth: Option<usize>,
    pub folding: Folding,
    /// What agents see of each other's moves. Only read when histories
    /// are unfolded.
    pub visibility: Visibility,
    pub equivalence: Equivalence,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reduce: true,
            budget: Some(crate::REDUCTION_BUDGET),
            timeout: None,
            limit: Some(crate::EXPLORATION_LIMIT),
            depth: None,
            folding: Folding::default(),
            visibility: Visibility::default(),
            equivalence: Equivalence::default(),
        }
    }
}
