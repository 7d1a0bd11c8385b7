use crate::*;

/// What an agent learns about the joint action that was just played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Visibility {
    /// Each agent sees its own action only.
    #[default]
    Own,
    /// The whole joint action is public.
    Joint,
}

/// The part of a joint action one agent observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glimpse<'a> {
    Own(ActionId),
    Joint(&'a JointAction),
}

impl Visibility {
    pub fn glimpse<'a>(&self, agent: AgentId, action: &'a JointAction) -> Glimpse<'a> {
        match self {
            Self::Own => Glimpse::Own(action.of(agent)),
            Self::Joint => Glimpse::Joint(action),
        }
    }
}
