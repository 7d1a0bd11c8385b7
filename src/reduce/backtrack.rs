use crate::*;
use std::time::Duration;
use std::time::Instant;

/// Core reduction by backtracking search for shrinking endomorphisms.
///
/// Repeatedly looks for an endomorphism that avoids some world, and
/// replaces the model by its image. Once nothing can be avoided the image
/// is a core. The accumulated map is then composed with the inverse of its
/// restriction to the core, which makes it a retraction.
///
/// Search effort is bounded by a step budget and an optional deadline,
/// both counted per call.
#[derive(Debug, Clone, Copy)]
pub struct Backtrack {
    budget: Option<usize>,
    deadline: Option<Duration>,
}

impl Default for Backtrack {
    fn default() -> Self {
        Self::new(Some(crate::REDUCTION_BUDGET), None)
    }
}

impl Backtrack {
    pub fn new(budget: Option<usize>, deadline: Option<Duration>) -> Self {
        Self { budget, deadline }
    }
}

impl Reducer for Backtrack {
    fn reduce(&self, model: &Model) -> Result<Retraction, ReductionFailure> {
        let n = model.len();
        let mut effort = Effort::new(self.budget, self.deadline);
        let mut kept = (0..n).collect::<Vec<WorldId>>();
        let mut map = (0..n).collect::<Vec<WorldId>>();
        while let Some(endo) = Self::shrink(&model.induce(&kept), &mut effort)? {
            let mut position = vec![0; n];
            for (i, &w) in kept.iter().enumerate() {
                position[w] = i;
            }
            for image in map.iter_mut() {
                *image = kept[endo[position[*image]]];
            }
            let mut next = endo.iter().map(|&i| kept[i]).collect::<Vec<_>>();
            next.sort_unstable();
            next.dedup();
            log::trace!("shrunk {} worlds to {}", kept.len(), next.len());
            kept = next;
        }
        // the accumulated map permutes the core; undo that permutation
        let mut inverse = (0..n).collect::<Vec<WorldId>>();
        for &w in kept.iter() {
            inverse[map[w]] = w;
        }
        Ok(Retraction::from(
            map.iter().map(|&w| inverse[w]).collect::<Vec<_>>(),
        ))
    }
}

impl Backtrack {
    /// An endomorphism of `model` with a smaller image, if one exists.
    fn shrink(model: &Model, effort: &mut Effort) -> Result<Option<Vec<WorldId>>, ReductionFailure> {
        let search = Search::new(model);
        for avoided in (0..model.len()).rev() {
            if avoided == model.actual() || search.domains[avoided].len() < 2 {
                continue;
            }
            if let Some(endo) = search.avoiding(avoided, effort)? {
                return Ok(Some(endo));
            }
        }
        Ok(None)
    }
}

/// Constraint search over one model: every world picks an image world of
/// the same state, and related worlds must pick related images.
struct Search<'m> {
    model: &'m Model,
    classes: Vec<Vec<Vec<WorldId>>>,
    domains: Vec<Vec<WorldId>>,
    order: Vec<WorldId>,
}

impl<'m> Search<'m> {
    fn new(model: &'m Model) -> Self {
        let n = model.len();
        let classes = model
            .relations()
            .iter()
            .map(Relation::classes)
            .collect::<Vec<_>>();
        let domains = (0..n)
            .map(|w| (0..n).filter(|&v| model.state(v) == model.state(w)).collect())
            .collect::<Vec<Vec<WorldId>>>();
        // assign outward from the actual world so constraints bite early
        let mut order = vec![model.actual()];
        let mut seen = vec![false; n];
        seen[model.actual()] = true;
        let mut i = 0;
        while order.len() < n {
            if i == order.len() {
                let Some(stray) = (0..n).find(|&w| !seen[w]) else {
                    break;
                };
                seen[stray] = true;
                order.push(stray);
            }
            let world = order[i];
            for (agent, relation) in model.relations().iter().enumerate() {
                for &other in classes[agent][relation.class(world)].iter() {
                    if !seen[other] {
                        seen[other] = true;
                        order.push(other);
                    }
                }
            }
            i += 1;
        }
        Self {
            model,
            classes,
            domains,
            order,
        }
    }

    fn avoiding(&self, avoided: WorldId, effort: &mut Effort) -> Result<Option<Vec<WorldId>>, ReductionFailure> {
        let mut assignment = vec![None; self.model.len()];
        match self.extend(0, avoided, &mut assignment, effort)? {
            true => Ok(Some(assignment.into_iter().flatten().collect())),
            false => Ok(None),
        }
    }

    fn extend(
        &self,
        depth: usize,
        avoided: WorldId,
        assignment: &mut [Option<WorldId>],
        effort: &mut Effort,
    ) -> Result<bool, ReductionFailure> {
        let Some(&world) = self.order.get(depth) else {
            return Ok(true);
        };
        let actual = self.model.actual();
        for &image in self.domains[world].iter() {
            if image == avoided || (world == actual && image != actual) {
                continue;
            }
            effort.tick()?;
            if self.consistent(world, image, assignment) {
                assignment[world] = Some(image);
                if self.extend(depth + 1, avoided, assignment, effort)? {
                    return Ok(true);
                }
                assignment[world] = None;
            }
        }
        Ok(false)
    }

    fn consistent(&self, world: WorldId, image: WorldId, assignment: &[Option<WorldId>]) -> bool {
        self.model
            .relations()
            .iter()
            .enumerate()
            .all(|(agent, relation)| {
                self.classes[agent][relation.class(world)]
                    .iter()
                    .filter_map(|&other| assignment[other])
                    .all(|assigned| relation.related(image, assigned))
            })
    }
}

/// Step and time accounting for one reduction.
struct Effort {
    steps: usize,
    budget: Option<usize>,
    start: Instant,
    deadline: Option<Duration>,
}

impl Effort {
    const CLOCK_INTERVAL: usize = 256;

    fn new(budget: Option<usize>, deadline: Option<Duration>) -> Self {
        Self {
            steps: 0,
            budget,
            start: Instant::now(),
            deadline,
        }
    }

    fn tick(&mut self) -> Result<(), ReductionFailure> {
        self.steps += 1;
        if self.budget.is_some_and(|budget| self.steps > budget) {
            return Err(ReductionFailure::Exhausted { steps: self.steps - 1 });
        }
        if self.steps % Self::CLOCK_INTERVAL == 0 {
            let elapsed = self.start.elapsed();
            if self.deadline.is_some_and(|deadline| elapsed > deadline) {
                return Err(ReductionFailure::Timeout { elapsed });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(model: &Model) -> Model {
        let retraction = Backtrack::default().reduce(model).unwrap();
        assert!(retraction.is_valid(model));
        retraction.apply(model)
    }

    #[test]
    fn twins_fold() {
        let model = Model::new(vec![0, 1, 1, 1], vec![Relation::complete(4)], 0);
        let core = core(&model);
        assert!(core.len() == 2);
        assert!(core.states() == [0, 1]);
    }

    #[test]
    fn blind_copies_fold_into_actual() {
        // four worlds at one state, one agent perfectly informed,
        // the other confusing everything
        let model = Model::new(
            vec![0; 4],
            vec![Relation::discrete(4), Relation::complete(4)],
            2,
        );
        let core = core(&model);
        assert!(core.len() == 1);
        assert!(core.actual() == 0);
    }

    #[test]
    fn chains_fold_onto_their_start() {
        // 0 -a- 1 -b- 2 -a- 3 with mirrored states folds back onto 0 -a- 1
        let model = Model::new(
            vec![0, 1, 1, 0],
            vec![
                Relation::from_keys([0, 0, 1, 1]),
                Relation::from_keys([0, 1, 1, 2]),
            ],
            0,
        );
        let core = core(&model);
        assert!(core.len() == 2);
        assert!(core.states() == [0, 1]);
        assert!(!core.relation(1).related(0, 1));
    }

    #[test]
    fn asymmetric_chains_are_cores() {
        let model = Model::new(
            vec![0, 1, 0, 1],
            vec![
                Relation::from_keys([0, 0, 1, 1]),
                Relation::from_keys([0, 1, 1, 2]),
            ],
            0,
        );
        assert!(core(&model).len() == 4);
    }

    #[test]
    fn cores_stay_put() {
        let model = Model::new(
            vec![0, 1, 2],
            vec![Relation::from_keys([0, 0, 1]), Relation::from_keys([0, 1, 1])],
            1,
        );
        let retraction = Backtrack::default().reduce(&model).unwrap();
        assert!(retraction == Retraction::identity(3));
    }

    #[test]
    fn cores_are_isomorphism_invariant() {
        let model = Model::new(
            vec![0, 1, 0, 1, 1],
            vec![
                Relation::from_keys([0, 0, 1, 1, 2]),
                Relation::from_keys([0, 1, 1, 2, 2]),
            ],
            0,
        );
        let relabeled = model.induce(&[0, 4, 2, 1, 3]);
        assert!(core(&model).canonize().0 == core(&relabeled).canonize().0);
    }

    #[test]
    fn budget_is_enforced() {
        let model = Model::new(vec![0; 6], vec![Relation::complete(6)], 0);
        let reducer = Backtrack::new(Some(3), None);
        assert!(reducer.reduce(&model) == Err(ReductionFailure::Exhausted { steps: 3 }));
    }

    #[test]
    fn generous_deadline_completes() {
        let model = Model::new(vec![0; 6], vec![Relation::complete(6)], 0);
        let reducer = Backtrack::new(None, Some(Duration::from_secs(60)));
        let retraction = reducer.reduce(&model).unwrap();
        assert!(retraction.apply(&model).len() == 1);
    }
}
