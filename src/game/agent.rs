use crate::*;

/// A player: its ordered action alphabet and what it can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    actions: Vec<String>,
    partition: Partition,
}

impl Agent {
    pub fn new(actions: Vec<String>, partition: Partition) -> Self {
        Self { actions, partition }
    }
    pub fn actions(&self) -> &[String] {
        &self.actions
    }
    pub fn action(&self, index: ActionId) -> &str {
        &self.actions[index]
    }
    /// Position of a named action in this agent's alphabet.
    pub fn find(&self, name: &str) -> Option<ActionId> {
        self.actions.iter().position(|a| a == name)
    }
    pub fn partition(&self) -> &Partition {
        &self.partition
    }
}
