use crate::*;

/// A point of play: the residual structure left after the last move.
///
/// With states folded, every context is the lifted state model at the
/// current state. With histories unfolded, the root context holds a single
/// world at the initial state and every other context is the product update
/// of an explored unfolded state's core with the joint action that was
/// played. Contexts are compared by exact
/// structure, so structurally identical residuals are explored once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Context(Model);

impl Context {
    pub fn root(game: &Game) -> Self {
        Self(Model::singleton(game.initial(), game.agents().len()))
    }
    /// Every game state as a world, related by the observation partitions,
    /// with `state` actual.
    pub fn lifted(game: &Game, state: StateId) -> Self {
        Self(Model::lift(game, state))
    }
    pub fn residual(&self) -> &Model {
        &self.0
    }
    /// The game state play is currently in.
    pub fn state(&self) -> StateId {
        self.0.actual_state()
    }
}

impl From<Model> for Context {
    fn from(residual: Model) -> Self {
        Self(residual)
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{} {}", self.state(), self.0)
    }
}
