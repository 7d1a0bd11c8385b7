use crate::*;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::BTreeSet;
use std::collections::HashSet;
use std::collections::VecDeque;

/// A node of the unfolded game: one equivalence class of knowledge.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UnfoldedState {
    id: UnfoldedId,
    state: StateId,
    signature: Signature,
    model: Model,
    degraded: bool,
}

impl UnfoldedState {
    pub fn new(id: UnfoldedId, signature: Signature, model: Model, degraded: bool) -> Self {
        Self {
            id,
            state: model.actual_state(),
            signature,
            model,
            degraded,
        }
    }
    pub fn id(&self) -> UnfoldedId {
        self.id
    }
    /// The game state play is actually in.
    pub fn state(&self) -> StateId {
        self.state
    }
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
    /// Canonical representative of the class.
    pub fn model(&self) -> &Model {
        &self.model
    }
    /// Whether core reduction failed and the model was kept unreduced.
    pub fn degraded(&self) -> bool {
        self.degraded
    }
}

/// The epistemic unfolding of a game.
///
/// A deterministic transition system over [`UnfoldedState`]s, labeled by
/// the joint actions of the underlying game. Node ids are registration
/// order, so state 0 is initial.
#[derive(Debug, Clone, Default)]
pub struct UnfoldedGame(DiGraph<UnfoldedState, JointAction>);

impl UnfoldedGame {
    pub fn new(states: Vec<UnfoldedState>) -> Self {
        let mut graph = DiGraph::with_capacity(states.len(), states.len());
        for state in states {
            graph.add_node(state);
        }
        Self(graph)
    }
    pub fn connect(&mut self, from: UnfoldedId, into: UnfoldedId, action: JointAction) {
        self.0
            .add_edge(NodeIndex::new(from), NodeIndex::new(into), action);
    }

    pub fn graph(&self) -> &DiGraph<UnfoldedState, JointAction> {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.node_count()
    }
    pub fn is_empty(&self) -> bool {
        self.0.node_count() == 0
    }
    pub fn initial(&self) -> UnfoldedId {
        0
    }
    pub fn state(&self, id: UnfoldedId) -> &UnfoldedState {
        &self.0[NodeIndex::new(id)]
    }
    pub fn states(&self) -> impl Iterator<Item = &UnfoldedState> + '_ {
        self.0.node_weights()
    }
    /// Every transition as (from, action, into), in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (UnfoldedId, &JointAction, UnfoldedId)> + '_ {
        self.0
            .edge_references()
            .map(|e| (e.source().index(), e.weight(), e.target().index()))
    }
    /// Outgoing moves of a state, ordered by joint action.
    pub fn successors(&self, id: UnfoldedId) -> Vec<(&JointAction, UnfoldedId)> {
        let mut moves = self
            .0
            .edges(NodeIndex::new(id))
            .map(|e| (e.weight(), e.target().index()))
            .collect::<Vec<_>>();
        moves.sort();
        moves
    }
    pub fn step(&self, id: UnfoldedId, action: &JointAction) -> Option<UnfoldedId> {
        self.0
            .edges(NodeIndex::new(id))
            .find(|e| e.weight() == action)
            .map(|e| e.target().index())
    }
    /// Game states some unfolded state sits in.
    pub fn underlying(&self) -> BTreeSet<StateId> {
        self.states().map(UnfoldedState::state).collect()
    }
    /// Unfolded states reachable from the initial one.
    pub fn reachable(&self) -> BTreeSet<UnfoldedId> {
        let mut seen = BTreeSet::new();
        if self.is_empty() {
            return seen;
        }
        let mut bfs = petgraph::visit::Bfs::new(&self.0, NodeIndex::new(self.initial()));
        while let Some(node) = bfs.next(&self.0) {
            seen.insert(node.index());
        }
        seen
    }
    pub fn degraded(&self) -> usize {
        self.states().filter(|s| s.degraded()).count()
    }

    /// Whether the two unfoldings are bisimilar as labeled transition
    /// systems when states are compared through `key`. Both are
    /// deterministic, so walking them in lockstep decides it.
    pub fn bisimilar_by<K, F>(&self, other: &Self, key: F) -> bool
    where
        K: PartialEq,
        F: Fn(&UnfoldedState) -> K,
    {
        if self.is_empty() || other.is_empty() {
            return self.is_empty() && other.is_empty();
        }
        let start = (self.initial(), other.initial());
        let mut seen = HashSet::from([start]);
        let mut todo = VecDeque::from([start]);
        while let Some((a, b)) = todo.pop_front() {
            if key(self.state(a)) != key(other.state(b)) {
                return false;
            }
            let left = self.successors(a);
            let right = other.successors(b);
            if left.len() != right.len() {
                return false;
            }
            for ((x, a), (y, b)) in left.into_iter().zip(right) {
                if x != y {
                    return false;
                }
                if seen.insert((a, b)) {
                    todo.push_back((a, b));
                }
            }
        }
        true
    }
}

#[derive(serde::Serialize)]
struct Export<'a> {
    initial: UnfoldedId,
    states: Vec<&'a UnfoldedState>,
    transitions: Vec<Transition<'a>>,
}

#[derive(serde::Serialize)]
struct Transition<'a> {
    from: UnfoldedId,
    action: &'a JointAction,
    into: UnfoldedId,
}

impl serde::Serialize for UnfoldedGame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Export {
            initial: self.initial(),
            states: self.states().collect(),
            transitions: self
                .transitions()
                .map(|(from, action, into)| Transition { from, action, into })
                .collect(),
        }
        .serialize(serializer)
    }
}
