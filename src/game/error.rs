use crate::*;

/// A game description that violates the [`Game`] invariants.
///
/// Always fatal: nothing is explored from an invalid game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Io { path: String, reason: String },
    Syntax { line: usize, reason: String },
    Missing { section: &'static str },
    NoAgents,
    AgentCount { alphabets: usize, partitions: usize },
    EmptyAlphabet { agent: AgentId },
    Locations { index: usize },
    UnknownInitial { state: StateId },
    UnknownState { state: StateId },
    EmptyClass { agent: AgentId },
    Overlap { agent: AgentId, state: StateId },
    Uncovered { agent: AgentId, state: StateId },
    Arity { state: StateId, expected: usize, found: usize },
    UnknownAction { agent: AgentId, action: String },
    Conflict { state: StateId, action: JointAction, first: StateId, second: StateId },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, reason } => write!(f, "cannot read {}: {}", path, reason),
            Self::Syntax { line, reason } => write!(f, "line {}: {}", line, reason),
            Self::Missing { section } => write!(f, "expected the {} section", section),
            Self::NoAgents => write!(f, "a game needs at least one agent"),
            Self::AgentCount { alphabets, partitions } => write!(
                f,
                "{} action alphabets but {} observation partitions",
                alphabets, partitions
            ),
            Self::EmptyAlphabet { agent } => write!(f, "agent {} has no actions", agent),
            Self::Locations { index } => {
                write!(f, "location indices must run from 0 to n, found {}", index)
            }
            Self::UnknownInitial { state } => write!(f, "initial state {} is not declared", state),
            Self::UnknownState { state } => write!(f, "state {} is not declared", state),
            Self::EmptyClass { agent } => write!(f, "agent {} declares an empty class", agent),
            Self::Overlap { agent, state } => {
                write!(f, "agent {} places state {} in two classes", agent, state)
            }
            Self::Uncovered { agent, state } => {
                write!(f, "agent {} does not classify state {}", agent, state)
            }
            Self::Arity { state, expected, found } => write!(
                f,
                "move from state {} names {} actions, expected {}",
                state, found, expected
            ),
            Self::UnknownAction { agent, action } => {
                write!(f, "agent {} cannot perform {}", agent, action)
            }
            Self::Conflict { state, action, first, second } => write!(
                f,
                "move {} from state {} leads to both {} and {}",
                action, state, first, second
            ),
        }
    }
}

impl std::error::Error for LoadError {}
