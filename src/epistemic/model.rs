use crate::*;

/// A pointed multi-agent Kripke model.
///
/// Worlds are folded histories of play, remembered only through the game
/// state they end in. Distinct worlds may share a state. Every agent carries
/// an equivalence [`Relation`] over the worlds, and one world is actual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Model {
    states: Box<[StateId]>,
    relations: Box<[Relation]>,
    actual: WorldId,
}

impl Model {
    pub fn new(states: Vec<StateId>, relations: Vec<Relation>, actual: WorldId) -> Self {
        debug_assert!(actual < states.len());
        debug_assert!(relations.iter().all(|r| r.len() == states.len()));
        Self {
            states: states.into_boxed_slice(),
            relations: relations.into_boxed_slice(),
            actual,
        }
    }
    /// A single world where every agent knows the state.
    pub fn singleton(state: StateId, agents: usize) -> Self {
        Self::new(vec![state], vec![Relation::complete(1); agents], 0)
    }

    /// Every game state as a world, each agent relating the states its
    /// observation partition confuses.
    pub fn lift(game: &Game, actual: StateId) -> Self {
        let n = game.states().len();
        let relations = game
            .agents()
            .iter()
            .map(|agent| Relation::from_keys((0..n).map(|s| agent.partition().class(s))))
            .collect();
        Self::new((0..n).collect(), relations, actual)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }
    pub fn agents(&self) -> usize {
        self.relations.len()
    }
    pub fn actual(&self) -> WorldId {
        self.actual
    }
    /// Game state of the actual world.
    pub fn actual_state(&self) -> StateId {
        self.states[self.actual]
    }
    pub fn state(&self, world: WorldId) -> StateId {
        self.states[world]
    }
    pub fn states(&self) -> &[StateId] {
        &self.states
    }
    pub fn relation(&self, agent: AgentId) -> &Relation {
        &self.relations[agent]
    }
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// The submodel on a selection of worlds, renumbered in selection
    /// order. The selection must contain the actual world; duplicates are
    /// not allowed. Passing a permutation of all worlds relabels the model.
    pub fn induce(&self, worlds: &[WorldId]) -> Self {
        debug_assert!(worlds.contains(&self.actual));
        Self {
            states: worlds.iter().map(|&w| self.states[w]).collect(),
            relations: self.relations.iter().map(|r| r.restrict(worlds)).collect(),
            actual: worlds.iter().position(|&w| w == self.actual).unwrap_or(0),
        }
    }

    /// Whether `map` sends this model homomorphically into `into`:
    /// states and the actual world are preserved, and related worlds stay
    /// related for every agent.
    pub fn maps_into(&self, into: &Self, map: &[WorldId]) -> bool {
        map.len() == self.len()
            && map.iter().all(|&w| w < into.len())
            && map[self.actual] == into.actual
            && self.agents() == into.agents()
            && (0..self.len()).all(|w| self.states[w] == into.states[map[w]])
            && self
                .relations
                .iter()
                .zip(into.relations.iter())
                .all(|(from, onto)| {
                    from.classes().iter().all(|class| {
                        class
                            .iter()
                            .all(|&w| onto.related(map[class[0]], map[w]))
                    })
                })
    }

    /// Product update with a joint action played from the actual world.
    ///
    /// Successor worlds pair every world with every joint action its state
    /// offers. An agent confuses two successors iff it confused their
    /// origins, the actions played look the same to it, and it observes
    /// the same about the states they lead to. Returns `None` if the
    /// actual state does not offer `action`.
    pub fn update(&self, game: &Game, action: &JointAction, visibility: Visibility) -> Option<Self> {
        let mut worlds = Vec::new();
        let mut actual = None;
        for world in 0..self.len() {
            for (event, next) in game.moves(self.states[world]) {
                if world == self.actual && event == action {
                    actual = Some(worlds.len());
                }
                worlds.push((world, event, next));
            }
        }
        let actual = actual?;
        let relations = self
            .relations
            .iter()
            .enumerate()
            .map(|(agent, relation)| {
                let partition = game.agent(agent).partition();
                Relation::from_keys(worlds.iter().map(|&(world, event, next)| {
                    (
                        relation.class(world),
                        visibility.glimpse(agent, event),
                        partition.class(next),
                    )
                }))
            })
            .collect();
        let states = worlds.iter().map(|&(_, _, next)| next).collect();
        Some(Self::new(states, relations, actual))
    }

    /// Multi-line rendering with state labels, one line per agent.
    pub fn describe(&self, game: &Game) -> String {
        let mut lines = vec![format!(
            "worlds: {}",
            (0..self.len())
                .map(|w| match w == self.actual {
                    true => format!("{}:{}*", w, game.state(self.states[w])),
                    false => format!("{}:{}", w, game.state(self.states[w])),
                })
                .collect::<Vec<_>>()
                .join(" ")
        )];
        for (agent, relation) in self.relations.iter().enumerate() {
            lines.push(format!("agent {}: {}", agent, relation));
        }
        lines.join("\n")
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (w, state) in self.states.iter().enumerate() {
            match w == self.actual {
                true => write!(f, " *{}", state)?,
                false => write!(f, " {}", state)?,
            }
        }
        for relation in self.relations.iter() {
            write!(f, " | {}", relation)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A{x,y} sees everything, B{z} cannot tell 1 from 2.
    fn hidden() -> Game {
        let a = Agent::new(
            vec!["x".into(), "y".into()],
            Partition::discrete(3),
        );
        let b = Agent::new(
            vec!["z".into()],
            Partition::new(1, 3, &[vec![0], vec![1, 2]]).unwrap(),
        );
        let states = ["start", "left", "right"]
            .into_iter()
            .enumerate()
            .map(|(i, s)| State::new(i, s))
            .collect();
        Game::new(
            vec![a, b],
            states,
            0,
            vec![
                (0, JointAction::from([0, 0]), 1),
                (0, JointAction::from([1, 0]), 2),
            ],
        )
        .unwrap()
    }

    #[test]
    fn hidden_action_splits_knowledge() {
        let ref game = hidden();
        let root = Model::singleton(0, 2);
        let next = root
            .update(game, &JointAction::from([0, 0]), Visibility::Own)
            .unwrap();
        assert!(next.len() == 2);
        assert!(next.states() == [1, 2]);
        assert!(next.actual() == 0);
        assert!(!next.relation(0).related(0, 1));
        assert!(next.relation(1).related(0, 1));
    }

    #[test]
    fn joint_visibility_keeps_singletons_apart() {
        let ref game = hidden();
        let next = Model::singleton(0, 2)
            .update(game, &JointAction::from([1, 0]), Visibility::Joint)
            .unwrap();
        assert!(next.actual() == 1);
        assert!(next.relations().iter().all(|r| r.n_classes() == 2));
    }

    #[test]
    fn lifted_worlds_are_the_game_states() {
        let ref game = hidden();
        let lifted = Model::lift(game, 2);
        assert!(lifted.states() == [0, 1, 2]);
        assert!(lifted.actual_state() == 2);
        assert!(lifted.relation(0).n_classes() == 3);
        assert!(lifted.relation(1).related(1, 2));
        assert!(!lifted.relation(1).related(0, 1));
    }

    #[test]
    fn undefined_action() {
        let ref game = hidden();
        let root = Model::singleton(1, 2);
        assert!(root.update(game, &JointAction::from([0, 0]), Visibility::Own) == None);
    }

    #[test]
    fn induced_submodel() {
        let model = Model::new(
            vec![4, 5, 6],
            vec![Relation::from_keys([0, 0, 1]), Relation::complete(3)],
            1,
        );
        let sub = model.induce(&[2, 1]);
        assert!(sub.states() == [6, 5]);
        assert!(sub.actual() == 1);
        assert!(!sub.relation(0).related(0, 1));
        assert!(sub.relation(1).related(0, 1));
    }

    #[test]
    fn homomorphisms() {
        let twins = Model::new(
            vec![0, 1, 1],
            vec![Relation::complete(3)],
            0,
        );
        let core = twins.induce(&[0, 1]);
        assert!(twins.maps_into(&core, &[0, 1, 1]));
        assert!(!twins.maps_into(&core, &[1, 1, 1]));
        assert!(!twins.maps_into(&core, &[0, 0, 1]));
        let apart = Model::new(vec![0, 1], vec![Relation::discrete(2)], 0);
        assert!(!twins.maps_into(&apart, &[0, 1, 1]));
        assert!(apart.maps_into(&core, &[0, 1]));
    }
}
