use crate::*;

/// A declared game state: its index and display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct State {
    id: StateId,
    label: String,
}

impl State {
    pub fn new(id: StateId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
    pub fn id(&self) -> StateId {
        self.id
    }
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}
