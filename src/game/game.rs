use crate::*;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::VecDeque;

/// A finite multi-agent game with imperfect information.
///
/// Agents move simultaneously; a [`JointAction`] at a state leads to at most
/// one successor. States where a joint action is not listed simply do not
/// offer it. Each agent observes the play only up to its [`Partition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    agents: Vec<Agent>,
    states: Vec<State>,
    initial: StateId,
    moves: Vec<BTreeMap<JointAction, StateId>>,
}

impl Game {
    /// Validated construction. Identical duplicate moves are accepted,
    /// conflicting destinations are not.
    pub fn new(
        agents: Vec<Agent>,
        states: Vec<State>,
        initial: StateId,
        transitions: impl IntoIterator<Item = (StateId, JointAction, StateId)>,
    ) -> Result<Self, LoadError> {
        let n = states.len();
        if agents.is_empty() {
            return Err(LoadError::NoAgents);
        }
        if let Some(state) = states.iter().enumerate().find(|(i, s)| s.id() != *i) {
            return Err(LoadError::Locations { index: state.1.id() });
        }
        if initial >= n {
            return Err(LoadError::UnknownInitial { state: initial });
        }
        for (id, agent) in agents.iter().enumerate() {
            if agent.actions().is_empty() {
                return Err(LoadError::EmptyAlphabet { agent: id });
            }
            let covered = agent.partition().len();
            if covered < n {
                return Err(LoadError::Uncovered { agent: id, state: covered });
            }
            if covered > n {
                return Err(LoadError::UnknownState { state: n });
            }
        }
        let mut moves = vec![BTreeMap::new(); n];
        for (from, action, into) in transitions {
            for state in [from, into] {
                if state >= n {
                    return Err(LoadError::UnknownState { state });
                }
            }
            if action.arity() != agents.len() {
                return Err(LoadError::Arity {
                    state: from,
                    expected: agents.len(),
                    found: action.arity(),
                });
            }
            for (agent, index) in action.iter().enumerate() {
                if index >= agents[agent].actions().len() {
                    return Err(LoadError::UnknownAction {
                        agent,
                        action: index.to_string(),
                    });
                }
            }
            match moves[from].insert(action.clone(), into) {
                Some(prior) if prior != into => {
                    return Err(LoadError::Conflict {
                        state: from,
                        action,
                        first: prior,
                        second: into,
                    });
                }
                _ => continue,
            }
        }
        Ok(Self {
            agents,
            states,
            initial,
            moves,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }
    pub fn agent(&self, agent: AgentId) -> &Agent {
        &self.agents[agent]
    }
    pub fn states(&self) -> &[State] {
        &self.states
    }
    pub fn state(&self, state: StateId) -> &State {
        &self.states[state]
    }
    pub fn initial(&self) -> StateId {
        self.initial
    }
    /// Moves available at a state, ordered by joint action.
    pub fn moves(&self, state: StateId) -> impl Iterator<Item = (&JointAction, StateId)> + '_ {
        self.moves[state].iter().map(|(a, s)| (a, *s))
    }
    /// Destination of a joint action, if the state offers it.
    pub fn next(&self, state: StateId, action: &JointAction) -> Option<StateId> {
        self.moves[state].get(action).copied()
    }
    /// Total number of declared moves.
    pub fn n_moves(&self) -> usize {
        self.moves.iter().map(BTreeMap::len).sum()
    }
    /// Whether an agent cannot tell two states apart.
    pub fn indistinguishable(&self, agent: AgentId, a: StateId, b: StateId) -> bool {
        self.agents[agent].partition().indistinguishable(a, b)
    }
    /// Every joint action over the agents' alphabets, in lexicographic order.
    pub fn joint_actions(&self) -> Vec<JointAction> {
        self.agents
            .iter()
            .fold(vec![vec![]], |prefixes, agent| {
                prefixes
                    .into_iter()
                    .flat_map(|prefix| {
                        (0..agent.actions().len()).map(move |a| {
                            let mut next = prefix.clone();
                            next.push(a);
                            next
                        })
                    })
                    .collect()
            })
            .into_iter()
            .map(JointAction::from)
            .collect()
    }
    /// States reachable from the initial state in the plain transition system.
    pub fn reachable(&self) -> BTreeSet<StateId> {
        let mut seen = BTreeSet::from([self.initial]);
        let mut todo = VecDeque::from([self.initial]);
        while let Some(state) = todo.pop_front() {
            for (_, next) in self.moves(state) {
                if seen.insert(next) {
                    todo.push_back(next);
                }
            }
        }
        seen
    }
}

impl Arbitrary for Game {
    fn random() -> Self {
        let n = rand::random_range(1..=ARBITRARY_STATES);
        let agents = (0..rand::random_range(1..=ARBITRARY_AGENTS))
            .map(|id| {
                let actions = (0..rand::random_range(1..=ARBITRARY_ACTIONS))
                    .map(|a| format!("a{}", a))
                    .collect::<Vec<_>>();
                let mut classes = vec![Vec::new(); n];
                (0..n).for_each(|s| classes[rand::random_range(0..n)].push(s));
                classes.retain(|c| !c.is_empty());
                let partition = Partition::new(id, n, &classes).expect("random partition");
                Agent::new(actions, partition)
            })
            .collect::<Vec<_>>();
        let states = (0..n).map(|s| State::new(s, format!("s{}", s))).collect();
        let mut game = Self::new(agents, states, 0, std::iter::empty()).expect("random game");
        let moves = (0..n)
            .flat_map(|s| game.joint_actions().into_iter().map(move |a| (s, a)))
            .filter(|_| rand::random_bool(0.7))
            .map(|(s, a)| (s, a, rand::random_range(0..n)))
            .collect::<Vec<_>>();
        for (from, action, into) in moves {
            game.moves[from].insert(action, into);
        }
        game
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agents(n: usize) -> Vec<Agent> {
        vec![
            Agent::new(vec!["l".into(), "r".into()], Partition::discrete(n)),
            Agent::new(vec!["w".into()], Partition::complete(n)),
        ]
    }
    fn states(n: usize) -> Vec<State> {
        (0..n).map(|s| State::new(s, format!("q{}", s))).collect()
    }

    #[test]
    fn construction() {
        let game = Game::new(
            agents(3),
            states(3),
            0,
            vec![
                (0, JointAction::from([0, 0]), 1),
                (0, JointAction::from([1, 0]), 2),
                (0, JointAction::from([1, 0]), 2),
            ],
        )
        .unwrap();
        assert!(game.n_moves() == 2);
        assert!(game.next(0, &JointAction::from([1, 0])) == Some(2));
        assert!(game.next(1, &JointAction::from([1, 0])) == None);
        assert!(game.reachable() == BTreeSet::from([0, 1, 2]));
        assert!(game.joint_actions().len() == 2);
    }

    #[test]
    fn conflicting() {
        let result = Game::new(
            agents(3),
            states(3),
            0,
            vec![
                (0, JointAction::from([0, 0]), 1),
                (0, JointAction::from([0, 0]), 2),
            ],
        );
        assert!(matches!(result, Err(LoadError::Conflict { state: 0, first: 1, second: 2, .. })));
    }

    #[test]
    fn undeclared_endpoint() {
        let result = Game::new(agents(2), states(2), 0, vec![(0, JointAction::from([0, 0]), 7)]);
        assert!(result.err() == Some(LoadError::UnknownState { state: 7 }));
    }

    #[test]
    fn unknown_initial() {
        let result = Game::new(agents(2), states(2), 4, std::iter::empty());
        assert!(result.err() == Some(LoadError::UnknownInitial { state: 4 }));
    }

    #[test]
    fn wrong_arity() {
        let result = Game::new(agents(2), states(2), 0, vec![(0, JointAction::from([0]), 1)]);
        assert!(matches!(result, Err(LoadError::Arity { expected: 2, found: 1, .. })));
    }

    #[test]
    fn random_games_are_valid() {
        for _ in 0..32 {
            let game = Game::random();
            assert!(game.reachable().contains(&game.initial()));
            assert!(game.agents().iter().all(|a| a.partition().len() == game.states().len()));
        }
    }
}
