use crate::*;

/// An agent's observation partition over the full state set.
///
/// Stored as the class index of every state, classes numbered in the
/// order they were declared. Every state belongs to exactly one class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition(Box<[usize]>);

impl Partition {
    /// Validate declared classes against `n` states.
    /// Classes must be disjoint, non-empty and together cover every state.
    pub fn new(agent: AgentId, n: usize, classes: &[Vec<StateId>]) -> Result<Self, LoadError> {
        let mut owner = vec![None; n];
        for (c, class) in classes.iter().enumerate() {
            if class.is_empty() {
                return Err(LoadError::EmptyClass { agent });
            }
            for &state in class {
                match owner.get_mut(state) {
                    None => return Err(LoadError::UnknownState { state }),
                    Some(Some(_)) => return Err(LoadError::Overlap { agent, state }),
                    Some(slot) => *slot = Some(c),
                }
            }
        }
        owner
            .into_iter()
            .enumerate()
            .map(|(state, c)| c.ok_or(LoadError::Uncovered { agent, state }))
            .collect::<Result<Vec<_>, _>>()
            .map(|classes| Self(classes.into_boxed_slice()))
    }
    /// Every state alone in its own class.
    pub fn discrete(n: usize) -> Self {
        Self((0..n).collect())
    }
    /// A single class holding every state.
    pub fn complete(n: usize) -> Self {
        Self(vec![0; n].into_boxed_slice())
    }
    /// Class index of a state.
    pub fn class(&self, state: StateId) -> usize {
        self.0[state]
    }
    pub fn indistinguishable(&self, a: StateId, b: StateId) -> bool {
        self.class(a) == self.class(b)
    }
    /// Number of states covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Members of every class, in class order.
    pub fn classes(&self) -> Vec<Vec<StateId>> {
        let n = self.0.iter().max().map_or(0, |c| c + 1);
        let mut classes = vec![Vec::new(); n];
        for (state, &c) in self.0.iter().enumerate() {
            classes[c].push(state);
        }
        classes.retain(|c| !c.is_empty());
        classes
    }
}
