use crate::*;

/// Explores a game into its [`UnfoldedGame`].
///
/// Work proceeds in rounds over a frontier of contexts. Within a round every
/// context is built, reduced and canonized independently (in parallel with
/// the `parallel` feature). Results are then registered in frontier order,
/// so state ids, and the unfolded game as a whole, do not depend on
/// scheduling. Only contexts that register a new state are expanded.
pub struct Engine<'g> {
    game: &'g Game,
    config: Config,
    builder: Builder,
    reducer: Box<dyn Reducer>,
    metrics: Metrics,
}

/// What one context explores to.
struct Outcome {
    signature: Signature,
    model: Model,
    degraded: bool,
}

impl<'g> Engine<'g> {
    pub fn new(game: &'g Game, config: Config) -> Self {
        let reducer: Box<dyn Reducer> = match config.reduce {
            true => Box::new(Backtrack::new(config.budget, config.timeout)),
            false => Box::new(Passthrough),
        };
        Self {
            game,
            builder: Builder::new(config.depth),
            config,
            reducer,
            metrics: Metrics::default(),
        }
    }
    /// Replace the core reduction strategy.
    pub fn with_reducer(mut self, reducer: impl Reducer + 'static) -> Self {
        self.reducer = Box::new(reducer);
        self
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn run(&self) -> Result<UnfoldedGame, UnfoldError> {
        log::info!(
            "unfolding {} states, {} agents, {} moves",
            self.game.states().len(),
            self.game.agents().len(),
            self.game.n_moves()
        );
        let registry = Registry::default();
        let mut arena = Arena::default();
        let mut resolved = Vec::<Option<UnfoldedId>>::new();
        let mut pending = Vec::<(UnfoldedId, JointAction, ContextId)>::new();
        let (root, _) = arena.enqueue(self.config.folding.root(self.game));
        let mut frontier = vec![root];
        while !frontier.is_empty() {
            let outcomes = self.batch(&arena, &frontier);
            let mut next = Vec::new();
            for (&context, outcome) in frontier.iter().zip(outcomes) {
                let model = outcome.model.clone();
                let (id, fresh) = registry.intern(outcome.signature, outcome.model, outcome.degraded)?;
                resolved.resize(arena.len(), None);
                resolved[context] = Some(id);
                if !fresh {
                    self.metrics.add_hits(1);
                    log::trace!("context {} merges into state {}", context, id);
                    continue;
                }
                self.metrics.add_misses(1);
                log::debug!("context {} registers state {} {}", context, id, model);
                self.guard(&arena, &registry, context)?;
                for (action, _) in self.game.moves(model.actual_state()) {
                    let residual = self
                        .config
                        .folding
                        .successor(self.game, &model, action, self.config.visibility)
                        .ok_or_else(|| Violation::Undefined {
                            state: id,
                            action: action.clone(),
                        })?;
                    let (successor, new) = arena.enqueue(residual);
                    if new {
                        next.push(successor);
                    }
                    pending.push((id, action.clone(), successor));
                }
                self.guard(&arena, &registry, context)?;
            }
            if let Some(progress) = self.metrics.checkpoint() {
                log::info!("{}", progress);
            }
            frontier = next;
        }
        let mut unfolded = UnfoldedGame::new(registry.into_states()?);
        for (from, action, context) in pending {
            let into = resolved
                .get(context)
                .copied()
                .flatten()
                .ok_or(Violation::Unresolved { context })?;
            unfolded.connect(from, into, action);
        }
        log::info!("unfolded into {} states: {}", unfolded.len(), self.metrics);
        Ok(unfolded)
    }

    fn guard(&self, arena: &Arena, registry: &Registry, context: ContextId) -> Result<(), UnfoldError> {
        let states = registry.len()?;
        match self.config.limit {
            Some(limit) if arena.len() > limit || states > limit => {
                Err(UnfoldError::ExplorationOverflow {
                    contexts: arena.len(),
                    states,
                    limit,
                    context,
                })
            }
            _ => Ok(()),
        }
    }

    /// Build, reduce, and canonize one context.
    fn explore(&self, context: &Context) -> Outcome {
        let built = self.builder.build(context);
        self.metrics.add_contexts(1);
        self.metrics.add_worlds(built.len());
        let (reduced, degraded) = self.reduce(built);
        let keyed = match self.config.equivalence {
            Equivalence::Isomorphism => reduced,
            Equivalence::Bisimulation => reduced.contract(),
        };
        let (signature, model) = keyed.canonize();
        Outcome {
            signature,
            model,
            degraded,
        }
    }

    /// The core of a model, or the model itself if the reducer fails.
    fn reduce(&self, model: Model) -> (Model, bool) {
        match self
            .reducer
            .reduce(&model)
            .and_then(|retraction| retraction.validate(&model))
        {
            Ok(retraction) => (retraction.apply(&model), false),
            Err(failure) => {
                self.metrics.add_degraded(1);
                log::warn!(
                    "core reduction {} on a {} world model, keeping it unreduced",
                    failure,
                    model.len()
                );
                (model, true)
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn batch(&self, arena: &Arena, frontier: &[ContextId]) -> Vec<Outcome> {
        use rayon::iter::IntoParallelRefIterator;
        use rayon::iter::ParallelIterator;
        // @parallelizable
        frontier
            .par_iter()
            .map(|&context| self.explore(arena.get(context)))
            .collect::<Vec<_>>()
    }
    #[cfg(not(feature = "parallel"))]
    fn batch(&self, arena: &Arena, frontier: &[ContextId]) -> Vec<Outcome> {
        frontier
            .iter()
            .map(|&context| self.explore(arena.get(context)))
            .collect::<Vec<_>>()
    }
}

/// Unfold with the given configuration.
pub fn unfold(game: &Game, config: Config) -> Result<UnfoldedGame, UnfoldError> {
    Engine::new(game, config).run()
}
