use crate::*;

/// One action index per agent, taken simultaneously.
///
/// Indices address each agent's own alphabet, so the same `JointAction`
/// means the same move at every state of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct JointAction(Box<[ActionId]>);

impl JointAction {
    /// Number of agents this joint action speaks for.
    pub fn arity(&self) -> usize {
        self.0.len()
    }
    /// The action chosen by one agent.
    pub fn of(&self, agent: AgentId) -> ActionId {
        self.0[agent]
    }
    pub fn iter(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.0.iter().copied()
    }
    /// Render with action names, e.g. `(left,wait)`.
    pub fn named(&self, game: &Game) -> String {
        format!(
            "({})",
            self.iter()
                .enumerate()
                .map(|(agent, action)| game.agent(agent).action(action))
                .collect::<Vec<_>>()
                .join(",")
        )
    }
}

impl From<Vec<ActionId>> for JointAction {
    fn from(actions: Vec<ActionId>) -> Self {
        Self(actions.into_boxed_slice())
    }
}

impl<const N: usize> From<[ActionId; N]> for JointAction {
    fn from(actions: [ActionId; N]) -> Self {
        Self(Box::new(actions))
    }
}

impl std::fmt::Display for JointAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({})",
            self.iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(",")
        )
    }
}
