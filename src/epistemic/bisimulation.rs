use super::canon::cells;
use super::canon::rank;
use crate::*;

impl Model {
    /// Quotient by the coarsest bisimulation.
    ///
    /// Worlds start grouped by state and are split by the set of groups each
    /// agent confuses them with, until stable. Blocks become worlds; two
    /// blocks are related for an agent if any of their members are. The
    /// quotient of an equivalence by a bisimulation is again an equivalence.
    pub fn contract(&self) -> Self {
        let n = self.len();
        let classes = self
            .relations()
            .iter()
            .map(Relation::classes)
            .collect::<Vec<_>>();
        let mut colors = rank(&(0..n).map(|w| self.state(w)).collect::<Vec<_>>());
        loop {
            let keys = (0..n)
                .map(|w| {
                    let neighborhoods = self
                        .relations()
                        .iter()
                        .enumerate()
                        .map(|(agent, relation)| {
                            let mut seen = classes[agent][relation.class(w)]
                                .iter()
                                .map(|&v| colors[v])
                                .collect::<Vec<_>>();
                            seen.sort_unstable();
                            seen.dedup();
                            seen
                        })
                        .collect::<Vec<_>>();
                    (colors[w], neighborhoods)
                })
                .collect::<Vec<_>>();
            let next = rank(&keys);
            let stable = cells(&next) == cells(&colors);
            colors = next;
            if stable {
                break;
            }
        }
        let k = cells(&colors);
        let mut states = vec![0; k];
        for w in 0..n {
            states[colors[w] as usize] = self.state(w);
        }
        let relations = classes
            .iter()
            .map(|partition| {
                let mut parent = (0..k).collect::<Vec<_>>();
                for class in partition {
                    for &w in class.iter().skip(1) {
                        let a = root(&mut parent, colors[class[0]] as usize);
                        let b = root(&mut parent, colors[w] as usize);
                        parent[a.max(b)] = a.min(b);
                    }
                }
                Relation::from_keys((0..k).map(|block| root(&mut parent, block)))
            })
            .collect();
        Self::new(states, relations, colors[self.actual()] as usize)
    }
}

fn root(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_worlds_collapse() {
        let model = Model::new(vec![0, 1, 1], vec![Relation::complete(3)], 0);
        let quotient = model.contract();
        assert!(quotient.len() == 2);
        assert!(quotient.state(quotient.actual()) == 0);
        assert!(quotient.relation(0).related(0, 1));
    }

    #[test]
    fn distinguishable_worlds_survive() {
        // agent 0 confuses 0 with 1, agent 1 confuses 1 with 2
        let model = Model::new(
            vec![0, 0, 0],
            vec![Relation::from_keys([0, 0, 1]), Relation::from_keys([0, 1, 1])],
            0,
        );
        assert!(model.contract().len() == 1);
        let model = Model::new(
            vec![0, 1, 0],
            vec![Relation::from_keys([0, 0, 1]), Relation::from_keys([0, 1, 1])],
            0,
        );
        let quotient = model.contract();
        assert!(quotient.len() == 3);
        assert!(quotient.canonize().0 == model.canonize().0);
    }

    #[test]
    fn bisimilar_models_meet() {
        let small = Model::new(vec![0, 1], vec![Relation::complete(2)], 0);
        let large = Model::new(vec![0, 1, 1, 0], vec![Relation::complete(4)], 3);
        assert!(small.canonize().0 != large.canonize().0);
        assert!(small.contract().canonize().0 == large.contract().canonize().0);
    }
}
