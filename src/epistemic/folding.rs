use crate::*;

/// How much of the history of play a context remembers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Folding {
    /// Worlds are game states and agents confuse them exactly as their
    /// observation partitions say. Models never exceed the state count and
    /// are fixed by the current state, so there are at most as many
    /// unfolded states as reachable game states.
    #[default]
    States,
    /// Worlds are histories told apart by what each agent saw of the moves
    /// (see [`Visibility`]). Knowledge keeps growing with play and the run
    /// relies on core reduction and the exploration limit to stop; it can
    /// end in an overflow.
    Histories,
}

impl Folding {
    /// The point of play before any move.
    pub fn root(&self, game: &Game) -> Context {
        match self {
            Self::States => Context::lifted(game, game.initial()),
            Self::Histories => Context::root(game),
        }
    }
    /// The point of play after `action` from the actual world of `model`.
    pub fn successor(
        &self,
        game: &Game,
        model: &Model,
        action: &JointAction,
        visibility: Visibility,
    ) -> Option<Context> {
        match self {
            Self::States => game
                .next(model.actual_state(), action)
                .map(|state| Context::lifted(game, state)),
            Self::Histories => model.update(game, action, visibility).map(Context::from),
        }
    }
}
