use crate::*;

/// Closes a [`Context`] into the epistemic model agents hold there.
///
/// Starting from the actual world, worlds are added pass by pass while some
/// agent cannot tell them apart from a world already included, until no
/// pass adds anything. With a depth bound, at most that many passes run and
/// the model covers only that many levels of nested knowledge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder {
    depth: Option<usize>,
}

impl Builder {
    pub fn new(depth: Option<usize>) -> Self {
        Self { depth }
    }

    /// Worlds are numbered in discovery order, so the actual world is 0.
    pub fn build(&self, context: &Context) -> Model {
        let residual = context.residual();
        let classes = residual
            .relations()
            .iter()
            .map(Relation::classes)
            .collect::<Vec<_>>();
        let mut included = vec![false; residual.len()];
        included[residual.actual()] = true;
        let mut order = vec![residual.actual()];
        let mut frontier = vec![residual.actual()];
        let mut passes = 0;
        while !frontier.is_empty() && self.depth.is_none_or(|d| passes < d) {
            let mut added = Vec::new();
            for &world in frontier.iter() {
                for (agent, relation) in residual.relations().iter().enumerate() {
                    for &other in classes[agent][relation.class(world)].iter() {
                        if !included[other] {
                            included[other] = true;
                            added.push(other);
                        }
                    }
                }
            }
            order.extend(added.iter().copied());
            frontier = added;
            passes += 1;
        }
        residual.induce(&order)
    }
}
