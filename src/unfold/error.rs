use crate::*;

/// Why exploration stopped without producing an unfolded game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnfoldError {
    /// Too many contexts or unfolded states. Typical of runs without core
    /// reduction, whose models can grow forever.
    ExplorationOverflow {
        contexts: usize,
        states: usize,
        limit: usize,
        context: ContextId,
    },
    /// Internal consistency broke. Always a bug.
    Invariant(Violation),
}

/// A broken internal invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Equal signatures for canonical models that differ.
    Collision { signature: Signature, state: UnfoldedId },
    /// A move recorded at a state that does not offer it.
    Undefined { state: UnfoldedId, action: JointAction },
    /// A transition whose target context was never registered.
    Unresolved { context: ContextId },
    /// A worker panicked while holding the registry.
    Poisoned,
}

impl std::fmt::Display for UnfoldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExplorationOverflow {
                contexts,
                states,
                limit,
                context,
            } => write!(
                f,
                "exploration overflow at context {}: {} contexts and {} unfolded states against a limit of {}",
                context, contexts, states, limit
            ),
            Self::Invariant(violation) => write!(f, "invariant violated: {}", violation),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collision { signature, state } => write!(
                f,
                "signature {} of unfolded state {} also names a different model",
                signature, state
            ),
            Self::Undefined { state, action } => write!(
                f,
                "unfolded state {} has no move {}",
                state, action
            ),
            Self::Unresolved { context } => {
                write!(f, "context {} was never registered", context)
            }
            Self::Poisoned => write!(f, "state registry poisoned"),
        }
    }
}

impl std::error::Error for UnfoldError {}

impl From<Violation> for UnfoldError {
    fn from(violation: Violation) -> Self {
        Self::Invariant(violation)
    }
}
